//! Terminal formatting for comparisons, the census, and sweeps.

use crate::domain::{CensusRow, CountryComparison, GlobalComparison, SweepResult};

/// Format the expected-vs-observed summary for one country.
pub fn format_country_comparison(comparison: &CountryComparison) -> String {
    let p = &comparison.profile;
    let mut out = String::new();

    out.push_str(&format!("=== elogap - top-{} gap for {} ===\n", comparison.top_k, p.country));
    out.push_str(&format!(
        "Eligible population: n={} | female share {:.1}%\n",
        p.eligible_count,
        100.0 * p.female_ratio
    ));
    out.push_str(&format!(
        "Rating fit: mean={:.1} | std={:.1}\n",
        p.mean, p.std_dev
    ));
    out.push_str(&format!(
        "Simulated gap ({} trials): mean={:.1} | std={:.1}\n",
        comparison.trials, comparison.simulated.mean, comparison.simulated.std_dev
    ));
    out.push_str(&format!("Observed gap: {:.1}\n", comparison.observed));
    out.push_str(&format!(
        "Normalized deviation: {:+.2} sigma\n",
        comparison.deviation
    ));

    out
}

/// Format the census table: one row per country, totals plus observed gaps.
pub fn format_census(rows: &[CensusRow]) -> String {
    let mut out = String::new();

    out.push_str("Country | Players | Female% | Top1 | Top20 | Top100\n");
    out.push_str("--------+---------+---------+------+-------+-------\n");
    for row in rows {
        out.push_str(&format!(
            "{:<7} | {:>7} | {:>6.2}% | {:>4.0} | {:>5.0} | {:>6.0}\n",
            row.country,
            row.population,
            100.0 * row.female_ratio,
            row.gap_top1,
            row.gap_top20,
            row.gap_top100,
        ));
    }

    out
}

/// Format the global normalized-deviation table.
pub fn format_global(global: &GlobalComparison) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== elogap - normalized top-{} deviations ({} trials per country) ===\n",
        global.top_k, global.trials
    ));
    out.push_str("Country | Observed | Expected (mean, std) | Deviation\n");
    out.push_str("--------+----------+----------------------+----------\n");
    for e in &global.entries {
        out.push_str(&format!(
            "{:<7} | {:>8.1} | ({:>7.1}, {:>6.1})    | {:>+8.2}\n",
            e.country, e.observed, e.expected_mean, e.expected_std, e.deviation,
        ));
    }
    out.push_str(&format!(
        "\nMean normalized deviation over {} countries: {:+.3}\n",
        global.entries.len(),
        global.mean_deviation
    ));

    out
}

/// Format a sweep result: the step table plus any fitted curve.
pub fn format_sweep(result: &SweepResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== elogap - {:?} sweep (top {}, {} trials per step) ===\n",
        result.kind, result.top_k, result.trials
    ));
    out.push_str(&format!("{:>14} | {:>8} | {:>7}\n", result.kind.x_label(), "mean", "stderr"));
    for p in &result.points {
        out.push_str(&format!("{:>14.4} | {:>8.2} | {:>7.2}\n", p.x, p.mean, p.std_err));
    }

    if let Some(fit) = &result.line_fit {
        out.push_str(&format!(
            "\nLinear fit: gap = {:.4} * x + {:.2}\n",
            fit.slope, fit.intercept
        ));
    }
    if let Some(fit) = &result.power_fit {
        out.push_str(&format!(
            "\nPower-law fit: gap = exp({:.3}) * x^{:.4}\n",
            fit.ln_scale, fit.exponent
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountryDeviation, CountryProfile, GapDistributionFit, SweepKind, SweepPoint};

    #[test]
    fn country_comparison_mentions_key_numbers() {
        let comparison = CountryComparison {
            profile: CountryProfile {
                country: "RUS".to_string(),
                eligible_count: 20_000,
                female_ratio: 0.12,
                mean: 1700.0,
                std_dev: 210.0,
            },
            top_k: 1,
            trials: 10_000,
            simulated: GapDistributionFit {
                mean: 120.0,
                std_dev: 70.0,
            },
            observed: 204.0,
            deviation: 1.2,
        };

        let text = format_country_comparison(&comparison);
        assert!(text.contains("RUS"));
        assert!(text.contains("20000"));
        assert!(text.contains("204.0"));
        assert!(text.contains("+1.20"));
    }

    #[test]
    fn sweep_table_has_one_line_per_point() {
        let result = SweepResult {
            kind: SweepKind::Variance,
            trials: 100,
            top_k: 1,
            points: vec![
                SweepPoint { x: 200.0, mean: 120.0, std_err: 7.0 },
                SweepPoint { x: 216.0, mean: 130.0, std_err: 7.5 },
            ],
            line_fit: Some(crate::domain::LineFit { slope: 0.62, intercept: -3.0 }),
            power_fit: None,
        };

        let text = format_sweep(&result);
        // banner + column header + 2 points + blank-prefixed fit line
        assert_eq!(text.matches('\n').count(), 6);
        assert!(text.contains("Linear fit"));
    }

    #[test]
    fn global_table_reports_mean_deviation() {
        let global = GlobalComparison {
            top_k: 1,
            trials: 1000,
            entries: vec![CountryDeviation {
                country: "ESP".to_string(),
                observed: 150.0,
                expected_mean: 120.0,
                expected_std: 60.0,
                deviation: 0.5,
            }],
            mean_deviation: 0.5,
        };

        let text = format_global(&global);
        assert!(text.contains("ESP"));
        assert!(text.contains("+0.500"));
    }
}
