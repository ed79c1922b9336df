//! Shared analysis pipeline used by the CLI front-end (and tests).
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> profile -> simulate -> observe -> normalize
//!
//! The CLI can then focus on presentation (printing, charts, exports).

use crate::domain::{
    CensusRow, CountryComparison, CountryDeviation, GapDistributionFit, GlobalComparison,
};
use crate::error::AppError;
use crate::io::ingest::RatingStore;
use crate::math::{fit_normal, mean};
use crate::sim::{estimate_gap_distribution, profile_params, sample_gaps, seed_for};
use crate::stats::{country_census, country_profile, observed_gap, top_countries_by_population};

/// All computed outputs of a single `elogap country` run.
///
/// The samples ride along for histogram rendering only; they are recomputed
/// every run and never persisted.
#[derive(Debug, Clone)]
pub struct CountryRun {
    pub comparison: CountryComparison,
    pub samples: Vec<f64>,
}

/// Profile a country, simulate its expected gap distribution, measure the
/// observed gap, and normalize the difference.
pub fn run_country(
    store: &RatingStore,
    country: &str,
    cutoff: i32,
    top_k: usize,
    trials: usize,
    seed: u64,
) -> Result<CountryRun, AppError> {
    let profile = country_profile(store, country, cutoff)?;
    let params = profile_params(&profile, top_k);

    let samples = sample_gaps(&params, trials, seed)?;
    let simulated = fit_normal(&samples)
        .ok_or_else(|| AppError::fit("Normal fit over gap samples failed (no samples)."))?;

    let observed = observed_gap(store, country, top_k, cutoff)?;
    let deviation = normalized_deviation(observed, &simulated)?;

    Ok(CountryRun {
        comparison: CountryComparison {
            profile,
            top_k,
            trials,
            simulated,
            observed,
            deviation,
        },
        samples,
    })
}

/// Census rows for the largest federations.
pub fn run_census(
    store: &RatingStore,
    cutoff: i32,
    min_population: usize,
    limit: usize,
) -> Result<Vec<CensusRow>, AppError> {
    let countries = eligible_countries(store, min_population, limit)?;
    countries
        .iter()
        .map(|country| country_census(store, country, cutoff))
        .collect()
}

/// Normalized expected-vs-observed deviations across the largest federations.
pub fn run_global(
    store: &RatingStore,
    cutoff: i32,
    top_k: usize,
    trials: usize,
    min_population: usize,
    limit: usize,
    seed: u64,
) -> Result<GlobalComparison, AppError> {
    let countries = eligible_countries(store, min_population, limit)?;

    let entries: Vec<CountryDeviation> = countries
        .iter()
        .map(|country| {
            let profile = country_profile(store, country, cutoff)?;
            let params = profile_params(&profile, top_k);
            let fit = estimate_gap_distribution(&params, trials, seed_for(seed, country))?;
            let observed = observed_gap(store, country, top_k, cutoff)?;
            let deviation = normalized_deviation(observed, &fit)?;
            Ok(CountryDeviation {
                country: country.clone(),
                observed,
                expected_mean: fit.mean,
                expected_std: fit.std_dev,
                deviation,
            })
        })
        .collect::<Result<_, AppError>>()?;

    let deviations: Vec<f64> = entries.iter().map(|e| e.deviation).collect();
    let mean_deviation = mean(&deviations)
        .ok_or_else(|| AppError::empty_population("No countries entered the comparison."))?;

    Ok(GlobalComparison {
        top_k,
        trials,
        entries,
        mean_deviation,
    })
}

fn eligible_countries(
    store: &RatingStore,
    min_population: usize,
    limit: usize,
) -> Result<Vec<String>, AppError> {
    let countries = top_countries_by_population(store, min_population, limit);
    if countries.is_empty() {
        return Err(AppError::empty_population(format!(
            "No countries with at least {min_population} rated players."
        )));
    }
    Ok(countries)
}

fn normalized_deviation(observed: f64, fit: &GapDistributionFit) -> Result<f64, AppError> {
    if fit.std_dev <= 0.0 {
        return Err(AppError::fit(
            "Simulated gap distribution has zero spread; cannot normalize the observed gap.",
        ));
    }
    Ok((observed - fit.mean) / fit.std_dev)
}
