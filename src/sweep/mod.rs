//! Parameter sweeps over the generative gap model.
//!
//! Each sweep holds two of {female ratio, total population, rating spread}
//! fixed and steps the third across a fixed grid, running the Monte Carlo
//! estimator at every step. Steps are independent, so they are evaluated in
//! parallel with per-step derived seeds; results come back in grid order.
//!
//! A failing step aborts the whole sweep — no partial results — and the error
//! names the step parameter that triggered it.

use rayon::prelude::*;

use crate::domain::{GapParams, SweepKind, SweepPoint, SweepResult};
use crate::error::AppError;
use crate::math::{fit_line, fit_power_law, standard_error};
use crate::sim::{estimate_gap_distribution, seed_for};

/// Baseline population shared by all sweeps.
const BASE_MEAN: f64 = 1500.0;
const BASE_STD: f64 = 200.0;

/// Ratio sweep: fixed population and spread.
const RATIO_POPULATION: f64 = 5000.0;
const RATIO_STEP: f64 = 0.015;
const RATIO_STEPS: usize = 25;

/// Population sweep: fixed ratio and spread.
const POPULATION_RATIO: f64 = 0.1;
const POPULATION_STEP: usize = 2000;
const POPULATION_STEPS: usize = 25;

/// Variance sweep: fixed sub-population sizes.
const VARIANCE_SIZE_A: usize = 4500;
const VARIANCE_SIZE_B: usize = 500;
const VARIANCE_BASE: f64 = 200.0;
const VARIANCE_STEP: f64 = 16.0;
const VARIANCE_STEPS: usize = 26;

/// Repeated-measures settings shared by every step of a sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    pub trials: usize,
    pub top_k: usize,
    pub seed: u64,
}

/// Run one sweep experiment.
pub fn run_sweep(kind: SweepKind, config: &SweepConfig) -> Result<SweepResult, AppError> {
    match kind {
        SweepKind::Ratio => ratio_sweep(config),
        SweepKind::Population => population_sweep(config),
        SweepKind::Variance => variance_sweep(config),
    }
}

/// Gap as a function of the female share of a 5000-player population.
fn ratio_sweep(config: &SweepConfig) -> Result<SweepResult, AppError> {
    let grid: Vec<(f64, GapParams)> = (1..=RATIO_STEPS)
        .map(|i| {
            let ratio = RATIO_STEP * i as f64;
            let params = GapParams {
                mean_a: BASE_MEAN,
                std_a: BASE_STD,
                size_a: (RATIO_POPULATION * (1.0 - ratio)) as usize,
                mean_b: BASE_MEAN,
                std_b: BASE_STD,
                size_b: (RATIO_POPULATION * ratio) as usize,
                top_k: config.top_k,
            };
            (ratio, params)
        })
        .collect();

    let points = sweep_points(SweepKind::Ratio, &grid, config)?;
    Ok(SweepResult {
        kind: SweepKind::Ratio,
        trials: config.trials,
        top_k: config.top_k,
        points,
        line_fit: None,
        power_fit: None,
    })
}

/// Gap as a function of total population at a 10% female share, with a
/// power-law fit on log-log axes.
fn population_sweep(config: &SweepConfig) -> Result<SweepResult, AppError> {
    let grid: Vec<(f64, GapParams)> = (1..=POPULATION_STEPS)
        .map(|i| {
            let population = (POPULATION_STEP * i) as f64;
            let params = GapParams {
                mean_a: BASE_MEAN,
                std_a: BASE_STD,
                size_a: (population * (1.0 - POPULATION_RATIO)) as usize,
                mean_b: BASE_MEAN,
                std_b: BASE_STD,
                size_b: (population * POPULATION_RATIO) as usize,
                top_k: config.top_k,
            };
            (population, params)
        })
        .collect();

    let points = sweep_points(SweepKind::Population, &grid, config)?;

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let means: Vec<f64> = points.iter().map(|p| p.mean).collect();
    let power_fit = fit_power_law(&xs, &means).ok_or_else(|| {
        AppError::fit("Power-law fit failed: population sweep produced a non-positive mean gap.")
    })?;

    Ok(SweepResult {
        kind: SweepKind::Population,
        trials: config.trials,
        top_k: config.top_k,
        points,
        line_fit: None,
        power_fit: Some(power_fit),
    })
}

/// Gap as a function of the rating spread at fixed sizes 4500/500, with an
/// ordinary least-squares line fit.
///
/// The fit runs against the simulated grid `200 + 16*i` itself.
fn variance_sweep(config: &SweepConfig) -> Result<SweepResult, AppError> {
    let grid: Vec<(f64, GapParams)> = (0..VARIANCE_STEPS)
        .map(|i| {
            let std_dev = VARIANCE_BASE + VARIANCE_STEP * i as f64;
            let params = GapParams {
                mean_a: BASE_MEAN,
                std_a: std_dev,
                size_a: VARIANCE_SIZE_A,
                mean_b: BASE_MEAN,
                std_b: std_dev,
                size_b: VARIANCE_SIZE_B,
                top_k: config.top_k,
            };
            (std_dev, params)
        })
        .collect();

    let points = sweep_points(SweepKind::Variance, &grid, config)?;

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let means: Vec<f64> = points.iter().map(|p| p.mean).collect();
    let line_fit = fit_line(&xs, &means)
        .ok_or_else(|| AppError::fit("Line fit failed over the variance sweep results."))?;

    Ok(SweepResult {
        kind: SweepKind::Variance,
        trials: config.trials,
        top_k: config.top_k,
        points,
        line_fit: Some(line_fit),
        power_fit: None,
    })
}

/// Evaluate every grid step (parallel) and assemble points in grid order.
fn sweep_points(
    kind: SweepKind,
    grid: &[(f64, GapParams)],
    config: &SweepConfig,
) -> Result<Vec<SweepPoint>, AppError> {
    grid.par_iter()
        .enumerate()
        .map(|(i, (x, params))| {
            let step_seed = seed_for(config.seed, &format!("{kind:?}-step-{i}"));
            let fit = estimate_gap_distribution(params, config.trials, step_seed)
                .map_err(|e| AppError::new(e.kind(), format!("{} = {x}: {e}", kind.x_label())))?;
            Ok(SweepPoint {
                x: *x,
                mean: fit.mean,
                std_err: standard_error(fit.std_dev, config.trials),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(trials: usize) -> SweepConfig {
        SweepConfig {
            trials,
            top_k: 1,
            seed: 1234,
        }
    }

    #[test]
    fn ratio_sweep_uses_the_fixed_grid() {
        let result = run_sweep(SweepKind::Ratio, &test_config(4)).unwrap();

        assert_eq!(result.points.len(), 25);
        assert!((result.points[0].x - 0.015).abs() < 1e-12);
        assert!((result.points[24].x - 0.375).abs() < 1e-12);
        assert!(result.points.iter().all(|p| p.mean.is_finite()));
        assert!(result.line_fit.is_none());
        assert!(result.power_fit.is_none());
    }

    #[test]
    fn variance_sweep_has_26_steps_and_a_line_fit() {
        let result = run_sweep(SweepKind::Variance, &test_config(30)).unwrap();

        assert_eq!(result.points.len(), 26);
        assert!((result.points[0].x - 200.0).abs() < 1e-12);
        assert!((result.points[25].x - 600.0).abs() < 1e-12);

        // The gap scales linearly with the spread, so the slope is positive
        // and the last mean clearly exceeds the first.
        let fit = result.line_fit.unwrap();
        assert!(fit.slope > 0.0);
        assert!(result.points[25].mean > result.points[0].mean);
    }

    #[test]
    fn population_sweep_fits_a_power_law() {
        let result = run_sweep(SweepKind::Population, &test_config(30)).unwrap();

        assert_eq!(result.points.len(), 25);
        assert!((result.points[0].x - 2000.0).abs() < 1e-12);
        assert!((result.points[24].x - 50_000.0).abs() < 1e-12);

        // The true exponent is small (the gap drifts slowly with population);
        // with a modest trial count we only pin down its magnitude. The fit
        // machinery itself is verified against exact synthetic pairs in the
        // ols tests.
        let fit = result.power_fit.unwrap();
        assert!(fit.exponent.is_finite());
        assert!(fit.exponent.abs() < 0.5);
        assert!(result.points.iter().all(|p| p.mean > 0.0));
    }

    #[test]
    fn sweep_points_carry_finite_errors() {
        let result = run_sweep(SweepKind::Ratio, &test_config(16)).unwrap();
        for p in &result.points {
            assert!(p.std_err >= 0.0);
            assert!(p.std_err.is_finite());
        }
    }

    #[test]
    fn seeded_sweeps_are_reproducible() {
        let a = run_sweep(SweepKind::Ratio, &test_config(4)).unwrap();
        let b = run_sweep(SweepKind::Ratio, &test_config(4)).unwrap();
        assert_eq!(a.points, b.points);
    }
}
