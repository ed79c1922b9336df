//! ASCII histogram for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - simulated gap samples: `#` columns
//! - observed gap: `|` marker column

use crate::plot::bin_samples;

/// Render the simulated-gap histogram with an optional observed-gap marker.
pub fn render_gap_histogram(
    samples: &[f64],
    observed: Option<f64>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some(hist) = bin_samples(samples, width, observed) else {
        return "(no gap samples to plot)\n".to_string();
    };
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);

    let mut grid = vec![vec![' '; width]; height];
    for (col, &count) in hist.counts.iter().enumerate() {
        // Rows filled bottom-up, proportional to the bucket count.
        let bar = ((count as f64 / peak as f64) * height as f64).round() as usize;
        for row in 0..bar.min(height) {
            grid[height - 1 - row][col] = '#';
        }
    }

    let observed_col = observed.map(|v| {
        let u = (v - hist.min) / (hist.max - hist.min);
        ((u * width as f64) as usize).min(width - 1)
    });
    if let Some(col) = observed_col {
        for row in grid.iter_mut() {
            row[col] = '|';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Histogram: gap=[{:.0}, {:.0}] | {} samples | peak bucket n={}\n",
        hist.min,
        hist.max,
        samples.len(),
        peak
    ));
    for row in &grid {
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }
    if let Some(v) = observed {
        out.push_str(&format!("# simulated   | observed ({v:.0})\n"));
    } else {
        out.push_str("# simulated\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_is_deterministic_and_sized() {
        let samples: Vec<f64> = (0..100).map(|i| (i % 10) as f64).collect();
        let a = render_gap_histogram(&samples, None, 40, 10);
        let b = render_gap_histogram(&samples, None, 40, 10);
        assert_eq!(a, b);

        // header + grid rows + legend
        assert_eq!(a.lines().count(), 1 + 10 + 1);
        assert!(a.lines().nth(5).unwrap().len() <= 40);
        assert!(a.contains('#'));
    }

    #[test]
    fn observed_marker_is_drawn() {
        let samples = vec![100.0, 110.0, 120.0, 130.0];
        let text = render_gap_histogram(&samples, Some(125.0), 20, 6);
        assert!(text.contains('|'));
        assert!(text.contains("observed (125)"));
    }

    #[test]
    fn empty_samples_degrade_gracefully() {
        let text = render_gap_histogram(&[], None, 40, 10);
        assert!(text.contains("no gap samples"));
    }
}
