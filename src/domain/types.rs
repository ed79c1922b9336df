//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during simulation and comparison
//! - exported to JSON/CSV
//! - consumed by the presentation layer (reports, charts)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default birth-year cutoff for the eligible population.
///
/// Players born after the cutoff are excluded from steady-state statistics
/// (they entered the list too recently to have converged ratings).
pub const DEFAULT_BIRTH_YEAR_CUTOFF: i32 = 2000;

/// Default minimum total population for a country to enter the census/global
/// comparison.
pub const DEFAULT_MIN_POPULATION: usize = 4050;

/// Default maximum number of countries in the census/global comparison.
pub const DEFAULT_COUNTRY_LIMIT: usize = 20;

/// One-character sex code from the rating list.
///
/// Only `'F'` and `'M'` participate in sex-filtered queries; every other code
/// maps to `Other` and is excluded from both sides of the gap. This mirrors
/// the upstream list semantics exactly — no inclusive fallback is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SexCode {
    Male,
    Female,
    Other,
}

impl SexCode {
    pub fn from_flag(flag: char) -> Self {
        match flag {
            'M' => SexCode::Male,
            'F' => SexCode::Female,
            _ => SexCode::Other,
        }
    }
}

/// One parsed line of the fixed-width rating list.
///
/// Created in bulk at load time and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub rating: i32,
    pub birth_year: i32,
    /// Three-letter federation code, e.g. `RUS`.
    pub country: String,
    pub sex: SexCode,
}

/// Per-country population statistics over the eligible sub-population.
///
/// The fit is maximum-likelihood: sample mean and *population* (uncorrected)
/// standard deviation of the eligible ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub country: String,
    /// Records matching the country with birth year at or below the cutoff.
    pub eligible_count: usize,
    /// Female share of the eligible population, in `[0, 1]`.
    pub female_ratio: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Normal fit over a collection of gap samples (MLE mean/std).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapDistributionFit {
    pub mean: f64,
    pub std_dev: f64,
}

/// Inputs for one synthetic top-K gap draw: two normal sub-populations that
/// may differ in size, mean, and spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapParams {
    pub mean_a: f64,
    pub std_a: f64,
    pub size_a: usize,
    pub mean_b: f64,
    pub std_b: f64,
    pub size_b: usize,
    pub top_k: usize,
}

/// Expected-vs-observed comparison for a single country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryComparison {
    pub profile: CountryProfile,
    pub top_k: usize,
    pub trials: usize,
    /// Fit over the simulated gap samples.
    pub simulated: GapDistributionFit,
    /// Gap measured directly from the real records.
    pub observed: f64,
    /// `(observed - simulated.mean) / simulated.std_dev`.
    pub deviation: f64,
}

/// One row of the country census: totals over the whole country population
/// (no birth-year cutoff) plus observed gaps at the standard top-K values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusRow {
    pub country: String,
    pub population: usize,
    pub female_ratio: f64,
    pub gap_top1: f64,
    pub gap_top20: f64,
    pub gap_top100: f64,
}

/// A single country's normalized deviation in the global comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryDeviation {
    pub country: String,
    pub observed: f64,
    pub expected_mean: f64,
    pub expected_std: f64,
    /// `(observed - expected_mean) / expected_std`.
    pub deviation: f64,
}

/// Cross-country comparison of normalized deviations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalComparison {
    pub top_k: usize,
    pub trials: usize,
    pub entries: Vec<CountryDeviation>,
    pub mean_deviation: f64,
}

/// Which sweep experiment to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SweepKind {
    /// Vary the female share of a fixed population.
    Ratio,
    /// Vary the total population at a fixed female share.
    Population,
    /// Vary the rating spread at fixed sub-population sizes.
    Variance,
}

impl SweepKind {
    /// Human-readable x-axis label for reports and charts.
    pub fn x_label(self) -> &'static str {
        match self {
            SweepKind::Ratio => "Female ratio",
            SweepKind::Population => "Total population",
            SweepKind::Variance => "Rating std dev",
        }
    }
}

/// One step of a sweep: the varied parameter value, the mean simulated gap,
/// and the standard error of that mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub x: f64,
    pub mean: f64,
    pub std_err: f64,
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Power law `y = exp(ln_scale) * x^exponent`, fitted on log-log axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    pub exponent: f64,
    pub ln_scale: f64,
}

impl PowerLawFit {
    pub fn predict(&self, x: f64) -> f64 {
        (self.ln_scale + self.exponent * x.ln()).exp()
    }
}

/// Output of one sweep experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub kind: SweepKind,
    pub trials: usize,
    pub top_k: usize,
    pub points: Vec<SweepPoint>,
    /// Present for the variance sweep.
    pub line_fit: Option<LineFit>,
    /// Present for the population sweep.
    pub power_fit: Option<PowerLawFit>,
}
