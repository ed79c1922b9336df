//! Command-line parsing for the rating-gap analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the statistics/simulation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_BIRTH_YEAR_CUTOFF, DEFAULT_COUNTRY_LIMIT, DEFAULT_MIN_POPULATION, SweepKind,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "elogap", version, about = "Rating-list top-K gender gap analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare the simulated and observed top-K gap for one country.
    Country(CountryArgs),
    /// List the largest federations with their observed top-1/20/100 gaps.
    Census(CensusArgs),
    /// Normalized expected-vs-observed deviations across the largest federations.
    Global(GlobalArgs),
    /// Sweep one generative-model parameter and fit the resulting trend.
    Sweep(SweepArgs),
}

/// Options shared by every command that reads the rating list.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Path to the fixed-width rating list (falls back to ELOGAP_RATING_LIST).
    #[arg(long)]
    pub list: Option<PathBuf>,

    /// Birth-year cutoff for the eligible population.
    #[arg(long, default_value_t = DEFAULT_BIRTH_YEAR_CUTOFF)]
    pub cutoff: i32,
}

#[derive(Debug, Args)]
pub struct CountryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Three-letter federation code, e.g. RUS.
    pub country: String,

    /// Number of top players averaged on each side.
    #[arg(short = 'k', long, default_value_t = 1)]
    pub top: usize,

    /// Monte Carlo trials for the simulated gap distribution.
    #[arg(long, default_value_t = 10_000)]
    pub trials: usize,

    /// Random seed (omit for fresh draws per run).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render an ASCII histogram in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal histogram.
    #[arg(long)]
    pub no_plot: bool,

    /// Histogram width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Histogram height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the histogram + observed marker as an SVG chart.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Export the comparison summary as JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CensusArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum total rated players for a country to be listed.
    #[arg(long, default_value_t = DEFAULT_MIN_POPULATION)]
    pub min_population: usize,

    /// Maximum number of countries listed.
    #[arg(long, default_value_t = DEFAULT_COUNTRY_LIMIT)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of top players averaged on each side.
    #[arg(short = 'k', long, default_value_t = 1)]
    pub top: usize,

    /// Monte Carlo trials per country.
    #[arg(long, default_value_t = 1000)]
    pub trials: usize,

    /// Random seed (omit for fresh draws per run).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum total rated players for a country to participate.
    #[arg(long, default_value_t = DEFAULT_MIN_POPULATION)]
    pub min_population: usize,

    /// Maximum number of countries compared.
    #[arg(long, default_value_t = DEFAULT_COUNTRY_LIMIT)]
    pub limit: usize,

    /// Write the deviation plot as an SVG chart.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Export the comparison table as JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Which parameter to sweep.
    #[arg(value_enum)]
    pub kind: SweepKind,

    /// Monte Carlo trials per sweep step.
    #[arg(long, default_value_t = 1000)]
    pub trials: usize,

    /// Number of top players averaged on each side.
    #[arg(short = 'k', long, default_value_t = 1)]
    pub top: usize,

    /// Random seed (omit for fresh draws per run).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export sweep steps to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the error-bar chart as an SVG file.
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_country_command() {
        let cli = Cli::try_parse_from(["elogap", "country", "RUS", "--trials", "500", "--seed", "7"])
            .unwrap();
        match cli.command {
            Command::Country(args) => {
                assert_eq!(args.country, "RUS");
                assert_eq!(args.trials, 500);
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.top, 1);
                assert_eq!(args.input.cutoff, DEFAULT_BIRTH_YEAR_CUTOFF);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_sweep_kind_values() {
        for (name, kind) in [
            ("ratio", SweepKind::Ratio),
            ("population", SweepKind::Population),
            ("variance", SweepKind::Variance),
        ] {
            let cli = Cli::try_parse_from(["elogap", "sweep", name]).unwrap();
            match cli.command {
                Command::Sweep(args) => assert_eq!(args.kind, kind),
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unknown_sweep_kind() {
        assert!(Cli::try_parse_from(["elogap", "sweep", "bogus"]).is_err());
    }
}
