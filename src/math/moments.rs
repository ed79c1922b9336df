//! Moment estimation and order-statistic helpers.
//!
//! The normal fit here is maximum-likelihood: sample mean plus *population*
//! (uncorrected) standard deviation. Every caller that fits ratings or gap
//! samples goes through `fit_normal` so the convention cannot drift between
//! components.

use crate::domain::GapDistributionFit;

/// Arithmetic mean. `None` on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population (uncorrected) standard deviation. `None` on an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// MLE normal fit over the samples. `None` on an empty slice.
pub fn fit_normal(values: &[f64]) -> Option<GapDistributionFit> {
    Some(GapDistributionFit {
        mean: mean(values)?,
        std_dev: population_std(values)?,
    })
}

/// Mean of the `k` largest values.
///
/// `k` is truncated to the slice length, so a small group never indexes out of
/// bounds. `None` when the slice is empty or `k` is zero.
pub fn top_k_mean(values: &[f64], k: usize) -> Option<f64> {
    if values.is_empty() || k == 0 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let take = k.min(sorted.len());
    mean(&sorted[..take])
}

/// Standard error of the mean for `n` samples with the given spread.
pub fn standard_error(std_dev: f64, n: usize) -> f64 {
    if n == 0 {
        return f64::NAN;
    }
    std_dev / (n as f64).sqrt()
}

/// Normal probability density at `x`.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return f64::NAN;
    }
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_population_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v).unwrap() - 5.0).abs() < 1e-12);
        // Classic textbook set: population std is exactly 2.
        assert!((population_std(&v).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn fit_normal_is_uncorrected() {
        // With Bessel's correction the std of [1, 3] would be sqrt(2); the
        // population std is exactly 1.
        let fit = fit_normal(&[1.0, 3.0]).unwrap();
        assert!((fit.mean - 2.0).abs() < 1e-12);
        assert!((fit.std_dev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_slices_are_undefined() {
        assert!(mean(&[]).is_none());
        assert!(population_std(&[]).is_none());
        assert!(fit_normal(&[]).is_none());
        assert!(top_k_mean(&[], 3).is_none());
    }

    #[test]
    fn top_k_mean_takes_largest() {
        let v = [1700.0, 2000.0, 1600.0, 1800.0];
        assert!((top_k_mean(&v, 1).unwrap() - 2000.0).abs() < 1e-12);
        assert!((top_k_mean(&v, 2).unwrap() - 1900.0).abs() < 1e-12);
    }

    #[test]
    fn top_k_mean_truncates_oversized_k() {
        let v = [10.0, 20.0];
        assert!((top_k_mean(&v, 5).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn top_k_mean_rejects_zero_k() {
        assert!(top_k_mean(&[1.0], 0).is_none());
    }

    #[test]
    fn standard_error_scales_with_sqrt_n() {
        assert!((standard_error(10.0, 100) - 1.0).abs() < 1e-12);
        assert!((standard_error(10.0, 400) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn normal_pdf_peak_value() {
        // Peak of the standard normal is 1/sqrt(2*pi).
        let peak = normal_pdf(0.0, 0.0, 1.0);
        assert!((peak - 0.3989422804014327).abs() < 1e-12);
        assert!(normal_pdf(1.0, 0.0, 1.0) < peak);
    }
}
