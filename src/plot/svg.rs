//! Static SVG charts via Plotters.
//!
//! One writer per figure:
//! - country histogram: simulated gap distribution + observed marker
//! - sweep chart: per-step error bars + fitted curve
//! - deviation chart: per-country normalized deviations against the standard
//!   normal density
//!
//! Only the `svg_backend` and `line_series` Plotters features are enabled, so
//! everything here is built from line/path/rectangle primitives.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{CountryComparison, GlobalComparison, SweepResult};
use crate::error::AppError;
use crate::math::normal_pdf;
use crate::plot::bin_samples;

const CHART_SIZE: (u32, u32) = (800, 600);

/// Observed data / simulated data color.
const DATA_COLOR: RGBColor = RGBColor(13, 122, 181);
/// Fitted curve / reference density color.
const FIT_COLOR: RGBColor = RGBColor(240, 38, 38);
const MARKER_COLOR: RGBColor = RGBColor(0, 0, 0);
const COUNTRY_LINE_COLOR: RGBColor = RGBColor(128, 128, 128);

fn render_error(what: &str, e: impl std::fmt::Display) -> AppError {
    AppError::io(format!("Failed to render {what}: {e}"))
}

/// Histogram of simulated gap samples with the observed gap marked.
pub fn write_country_histogram(
    path: &Path,
    comparison: &CountryComparison,
    samples: &[f64],
) -> Result<(), AppError> {
    let hist = bin_samples(samples, 120, Some(comparison.observed))
        .ok_or_else(|| AppError::fit("No gap samples to plot."))?;
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error("histogram", e))?;

    let title = format!(
        "{}: simulated vs observed top-{} gap",
        comparison.profile.country, comparison.top_k
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(hist.min..hist.max, 0.0..peak * 1.05)
        .map_err(|e| render_error("histogram axes", e))?;
    chart
        .configure_mesh()
        .x_desc("Rating difference")
        .y_desc("Repetitions")
        .draw()
        .map_err(|e| render_error("histogram mesh", e))?;

    chart
        .draw_series(hist.counts.iter().enumerate().map(|(i, &count)| {
            let x0 = hist.min + i as f64 * hist.bin_width;
            Rectangle::new(
                [(x0, 0.0), (x0 + hist.bin_width, count as f64)],
                DATA_COLOR.mix(0.5).filled(),
            )
        }))
        .map_err(|e| render_error("histogram bars", e))?
        .label("Simulated data")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], DATA_COLOR.mix(0.5).filled()));

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(comparison.observed, 0.0), (comparison.observed, peak)],
            MARKER_COLOR.stroke_width(2),
        )))
        .map_err(|e| render_error("observed marker", e))?
        .label("Observed difference")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], MARKER_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8).filled())
        .border_style(MARKER_COLOR.stroke_width(1))
        .draw()
        .map_err(|e| render_error("histogram legend", e))?;

    root.present().map_err(|e| render_error("histogram file", e))
}

/// Error-bar chart of sweep steps, with the fitted curve when present.
pub fn write_sweep_chart(path: &Path, result: &SweepResult) -> Result<(), AppError> {
    if result.points.is_empty() {
        return Err(AppError::fit("No sweep points to plot."));
    }

    let x_min = result.points.first().map(|p| p.x).unwrap_or(0.0);
    let x_max = result.points.last().map(|p| p.x).unwrap_or(1.0);
    let x_pad = (x_max - x_min).abs().max(1e-9) * 0.05;

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in &result.points {
        y_min = y_min.min(p.mean - p.std_err);
        y_max = y_max.max(p.mean + p.std_err);
    }
    let y_pad = (y_max - y_min).abs().max(1e-9) * 0.1;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error("sweep chart", e))?;

    let title = format!("Top-{} gap vs {}", result.top_k, result.kind.x_label().to_lowercase());
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )
        .map_err(|e| render_error("sweep axes", e))?;
    chart
        .configure_mesh()
        .x_desc(result.kind.x_label())
        .y_desc("Rating difference")
        .draw()
        .map_err(|e| render_error("sweep mesh", e))?;

    // Error bars first so the fitted curve draws on top.
    chart
        .draw_series(result.points.iter().map(|p| {
            PathElement::new(
                vec![(p.x, p.mean - p.std_err), (p.x, p.mean + p.std_err)],
                DATA_COLOR.stroke_width(1),
            )
        }))
        .map_err(|e| render_error("sweep error bars", e))?;
    chart
        .draw_series(
            result
                .points
                .iter()
                .map(|p| Circle::new((p.x, p.mean), 3, DATA_COLOR.filled())),
        )
        .map_err(|e| render_error("sweep points", e))?
        .label("Simulated mean gap")
        .legend(|(x, y)| Circle::new((x + 6, y), 3, DATA_COLOR.filled()));

    let fitted: Option<Box<dyn Fn(f64) -> f64>> = match (&result.line_fit, &result.power_fit) {
        (Some(line), _) => Some(Box::new({
            let line = *line;
            move |x| line.predict(x)
        })),
        (_, Some(power)) => Some(Box::new({
            let power = *power;
            move |x| power.predict(x)
        })),
        _ => None,
    };
    if let Some(predict) = fitted {
        let steps = 100;
        let curve: Vec<(f64, f64)> = (0..=steps)
            .map(|i| {
                let x = x_min + (x_max - x_min) * i as f64 / steps as f64;
                (x, predict(x))
            })
            .collect();
        chart
            .draw_series(LineSeries::new(curve, FIT_COLOR.stroke_width(2)))
            .map_err(|e| render_error("sweep fit curve", e))?
            .label("Fitted curve")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], FIT_COLOR.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8).filled())
        .border_style(MARKER_COLOR.stroke_width(1))
        .draw()
        .map_err(|e| render_error("sweep legend", e))?;

    root.present().map_err(|e| render_error("sweep file", e))
}

/// Per-country normalized deviations against the standard normal density.
///
/// Each country draws as a vertical line from the axis up to the density at
/// its deviation; the mean deviation draws heavier, and the N(0, 1) curve
/// overlays in the fit color.
pub fn write_deviation_chart(path: &Path, global: &GlobalComparison) -> Result<(), AppError> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error("deviation chart", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Normalized top-{} gap deviations", global.top_k),
            ("sans-serif", 20),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-3.2..3.2, 0.0..0.5)
        .map_err(|e| render_error("deviation axes", e))?;
    chart
        .configure_mesh()
        .x_desc("Normalized deviation")
        .y_desc("Density")
        .draw()
        .map_err(|e| render_error("deviation mesh", e))?;

    chart
        .draw_series(global.entries.iter().map(|e| {
            let x = e.deviation.clamp(-3.2, 3.2);
            PathElement::new(
                vec![(x, 0.0), (x, normal_pdf(x, 0.0, 1.0))],
                COUNTRY_LINE_COLOR.stroke_width(1),
            )
        }))
        .map_err(|e| render_error("deviation lines", e))?
        .label("Country deviations")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], COUNTRY_LINE_COLOR.stroke_width(1)));

    let mean = global.mean_deviation.clamp(-3.2, 3.2);
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(mean, 0.0), (mean, normal_pdf(mean, 0.0, 1.0))],
            MARKER_COLOR.stroke_width(3),
        )))
        .map_err(|e| render_error("mean deviation line", e))?
        .label("Mean deviation")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], MARKER_COLOR.stroke_width(3)));

    let steps = 200;
    let curve: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let x = -3.2 + 6.4 * i as f64 / steps as f64;
            (x, normal_pdf(x, 0.0, 1.0))
        })
        .collect();
    chart
        .draw_series(LineSeries::new(curve, FIT_COLOR.stroke_width(2)))
        .map_err(|e| render_error("reference density", e))?
        .label("Normal(0, 1) density")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], FIT_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8).filled())
        .border_style(MARKER_COLOR.stroke_width(1))
        .draw()
        .map_err(|e| render_error("deviation legend", e))?;

    root.present().map_err(|e| render_error("deviation file", e))
}
