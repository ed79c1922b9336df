//! Per-country population statistics over the rating list.
//!
//! Everything here is deterministic: the same store and parameters always
//! produce bit-identical results. Randomness lives in `sim`.

use crate::domain::{CensusRow, CountryProfile, SexCode};
use crate::error::AppError;
use crate::io::ingest::RatingStore;
use crate::math::{fit_normal, top_k_mean};

/// Derive a country's eligible-population profile.
///
/// Eligible records match the country and have `birth_year <= cutoff`. The
/// rating distribution is fitted by MLE (mean + population std); the female
/// ratio is the Female share of the eligible records.
pub fn country_profile(
    store: &RatingStore,
    country: &str,
    cutoff: i32,
) -> Result<CountryProfile, AppError> {
    let eligible = store.query().country(country).birth_year_at_most(cutoff);
    let ratings = eligible.ratings();
    if ratings.is_empty() {
        return Err(AppError::empty_population(format!(
            "No eligible players for {country} with birth year <= {cutoff}."
        )));
    }

    let fit = fit_normal(&ratings).ok_or_else(|| {
        AppError::fit(format!("Normal fit failed for {country} ({} ratings).", ratings.len()))
    })?;

    let female = eligible.clone().sex(SexCode::Female).count();

    Ok(CountryProfile {
        country: country.to_string(),
        eligible_count: ratings.len(),
        female_ratio: female as f64 / ratings.len() as f64,
        mean: fit.mean,
        std_dev: fit.std_dev,
    })
}

/// Country codes whose **total** population (no birth-year cutoff) reaches
/// `min_population`, in alphabetical code order, truncated to `limit`.
pub fn top_countries_by_population(
    store: &RatingStore,
    min_population: usize,
    limit: usize,
) -> Vec<String> {
    store
        .distinct_countries()
        .into_iter()
        .filter(|code| store.query().country(code).count() >= min_population)
        .take(limit)
        .collect()
}

/// Top-K gap measured directly from the real records: mean rating of the K
/// best eligible men minus mean rating of the K best eligible women.
///
/// `top_k` larger than a subset truncates to the subset size; an empty subset
/// is an error, as is `top_k == 0`.
pub fn observed_gap(
    store: &RatingStore,
    country: &str,
    top_k: usize,
    cutoff: i32,
) -> Result<f64, AppError> {
    if top_k == 0 {
        return Err(AppError::invalid_top_k("top-K must be >= 1."));
    }

    let eligible = store.query().country(country).birth_year_at_most(cutoff);
    let men = eligible.clone().sex(SexCode::Male).ratings();
    let women = eligible.sex(SexCode::Female).ratings();

    let top_men = top_k_mean(&men, top_k).ok_or_else(|| {
        AppError::empty_population(format!(
            "No eligible male players for {country} with birth year <= {cutoff}."
        ))
    })?;
    let top_women = top_k_mean(&women, top_k).ok_or_else(|| {
        AppError::empty_population(format!(
            "No eligible female players for {country} with birth year <= {cutoff}."
        ))
    })?;

    Ok(top_men - top_women)
}

/// Census row for one country: totals over the whole country population plus
/// observed gaps at the standard top-K values (1, 20, 100).
pub fn country_census(store: &RatingStore, country: &str, cutoff: i32) -> Result<CensusRow, AppError> {
    let population = store.query().country(country).count();
    if population == 0 {
        return Err(AppError::empty_population(format!("No players for {country}.")));
    }
    let female = store.query().country(country).sex(SexCode::Female).count();

    Ok(CensusRow {
        country: country.to_string(),
        population,
        female_ratio: female as f64 / population as f64,
        gap_top1: observed_gap(store, country, 1, cutoff)?,
        gap_top20: observed_gap(store, country, 20, cutoff)?,
        gap_top100: observed_gap(store, country, 100, cutoff)?,
    })
}
