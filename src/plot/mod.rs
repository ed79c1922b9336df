//! Presentation-layer chart rendering.
//!
//! Two renderers share the same inputs (gap samples, sweep points, global
//! deviations):
//!
//! - `ascii`: fixed-size terminal histogram, deterministic output
//! - `svg`: static SVG charts via Plotters (svg backend only)

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

/// Equal-width histogram over a sample collection.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

/// Bin samples into `bins` equal-width buckets.
///
/// The range may be widened by `extend_to` (e.g., to keep an observed-value
/// marker inside the axes). Returns `None` for no samples, zero bins, or
/// non-finite values.
pub fn bin_samples(samples: &[f64], bins: usize, extend_to: Option<f64>) -> Option<Histogram> {
    if samples.is_empty() || bins == 0 {
        return None;
    }
    if samples.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if let Some(v) = extend_to {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min == max {
        // Degenerate spread: widen so every sample lands in a real bucket.
        min -= 0.5;
        max += 0.5;
    }

    let bin_width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in samples {
        let idx = (((v - min) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram {
        min,
        max,
        bin_width,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binning_covers_the_full_range() {
        let samples = [0.0, 1.0, 2.0, 3.0, 4.0];
        let hist = bin_samples(&samples, 4, None).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 5);
        // The maximum lands in the last bucket, not out of bounds.
        assert_eq!(hist.counts[3], 2);
    }

    #[test]
    fn binning_extends_to_marker() {
        let samples = [10.0, 11.0];
        let hist = bin_samples(&samples, 10, Some(20.0)).unwrap();
        assert!((hist.max - 20.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_rejected_or_widened() {
        assert!(bin_samples(&[], 10, None).is_none());
        assert!(bin_samples(&[1.0], 0, None).is_none());
        assert!(bin_samples(&[1.0, f64::NAN], 4, None).is_none());

        let hist = bin_samples(&[5.0, 5.0], 4, None).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 2);
    }
}
