//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the rating list
//! - runs the profile/simulate/observe pipeline or a parameter sweep
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{CensusArgs, Command, CountryArgs, GlobalArgs, InputArgs, SweepArgs};
use crate::error::AppError;
use crate::io::ingest::{RatingStore, resolve_list_path};
use crate::sweep::SweepConfig;

pub mod pipeline;

/// Entry point for the `elogap` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Country(args) => handle_country(args),
        Command::Census(args) => handle_census(args),
        Command::Global(args) => handle_global(args),
        Command::Sweep(args) => handle_sweep(args),
    }
}

fn handle_country(args: CountryArgs) -> Result<(), AppError> {
    let store = load_store(&args.input)?;
    let country = args.country.to_ascii_uppercase();

    let run = pipeline::run_country(
        &store,
        &country,
        args.input.cutoff,
        args.top,
        args.trials,
        resolve_seed(args.seed),
    )?;

    println!("{}", crate::report::format_country_comparison(&run.comparison));

    if args.plot && !args.no_plot {
        println!(
            "{}",
            crate::plot::render_gap_histogram(
                &run.samples,
                Some(run.comparison.observed),
                args.width,
                args.height,
            )
        );
    }

    if let Some(path) = &args.svg {
        crate::plot::write_country_histogram(path, &run.comparison, &run.samples)?;
    }
    if let Some(path) = &args.export_json {
        crate::io::export::write_json(path, &run.comparison)?;
    }

    Ok(())
}

fn handle_census(args: CensusArgs) -> Result<(), AppError> {
    let store = load_store(&args.input)?;
    let rows = pipeline::run_census(&store, args.input.cutoff, args.min_population, args.limit)?;
    println!("{}", crate::report::format_census(&rows));
    Ok(())
}

fn handle_global(args: GlobalArgs) -> Result<(), AppError> {
    let store = load_store(&args.input)?;
    let global = pipeline::run_global(
        &store,
        args.input.cutoff,
        args.top,
        args.trials,
        args.min_population,
        args.limit,
        resolve_seed(args.seed),
    )?;

    println!("{}", crate::report::format_global(&global));

    if let Some(path) = &args.svg {
        crate::plot::write_deviation_chart(path, &global)?;
    }
    if let Some(path) = &args.export_json {
        crate::io::export::write_json(path, &global)?;
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = SweepConfig {
        trials: args.trials,
        top_k: args.top,
        seed: resolve_seed(args.seed),
    };
    let result = crate::sweep::run_sweep(args.kind, &config)?;

    println!("{}", crate::report::format_sweep(&result));

    if let Some(path) = &args.export {
        crate::io::export::write_sweep_csv(path, &result)?;
    }
    if let Some(path) = &args.svg {
        crate::plot::write_sweep_chart(path, &result)?;
    }

    Ok(())
}

fn load_store(input: &InputArgs) -> Result<RatingStore, AppError> {
    let path = resolve_list_path(input.list.clone())?;
    RatingStore::load(&path)
}

/// Explicit seeds reproduce; otherwise every run draws fresh from OS entropy.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
