//! Plain-text rendering of a [`SimulationSummary`].

use std::fmt::{self, Write as _};

use winner_bias_engine::SimulationParams;
use winner_bias_stats::histogram::HistogramBin;

use crate::{rates::RejectionRate, statistic::TStatisticDistribution, summary::SimulationSummary};

const MAX_BAR_WIDTH: u64 = 50;

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SimulationParams {
            subjects,
            replicates,
            alpha,
            sigma,
            seed,
        } = self.params;

        writeln!(f, "Winner-vs-Losers Type I Error Simulation")?;
        writeln!(f, "========================================")?;
        writeln!(f, "  Subjects (N):     {subjects}")?;
        writeln!(f, "  Replicates (B):   {replicates}")?;
        writeln!(f, "  Alpha:            {alpha}")?;
        writeln!(f, "  Sigma:            {sigma}")?;
        writeln!(f, "  Seed:             {seed}")?;
        writeln!(f, "  Flagged:          {}", self.flagged)?;
        writeln!(f)?;

        writeln!(f, "Rejection Rates")?;
        writeln!(
            f,
            "  {:<12} {:>9} {:>10} {:>11} {:>8} {:>8}  {:<18} {:>11}",
            "Test", "Rejected", "Evaluated", "Degenerate", "Rate", "MC SE", "95% CI", "Conditional",
        )?;
        writeln!(f, "  {}", "-".repeat(94))?;
        for rate in &self.rates {
            write_rate_row(f, rate, alpha)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Critical values (df = {}, two-sided alpha = {alpha}): {:.4} / {:.4}",
            self.critical.df, self.critical.lower, self.critical.upper,
        )?;

        for test in [&self.t_primary, &self.t_proposed] {
            writeln!(f)?;
            match test {
                Some(dist) => write_distribution(f, dist)?,
                None => writeln!(f, "(no non-degenerate t statistics)")?,
            }
        }
        Ok(())
    }
}

fn write_rate_row(f: &mut fmt::Formatter<'_>, rate: &RejectionRate, alpha: f64) -> fmt::Result {
    let (rate_str, se_str, ci_str) = match (
        rate.rate(),
        rate.standard_error(),
        rate.confidence_interval(),
    ) {
        (Some(p), Some(se), Some((lo, hi))) => (
            format!("{p:.4}"),
            format!("{se:.4}"),
            format!("[{lo:.4}, {hi:.4}]"),
        ),
        _ => ("N/A".to_owned(), "N/A".to_owned(), "N/A".to_owned()),
    };
    let conditional_str = rate
        .conditional_rate()
        .map_or_else(|| "N/A".to_owned(), |p| format!("{p:.4}"));
    let note = if rate.exceeds(alpha) { "inflated" } else { "" };
    writeln!(
        f,
        "  {:<12} {:>9} {:>10} {:>11} {:>8} {:>8}  {:<18} {:>11} {}",
        rate.test.to_string(),
        rate.rejections,
        rate.evaluated,
        rate.degenerate,
        rate_str,
        se_str,
        ci_str,
        conditional_str,
        note,
    )
}

fn write_distribution(f: &mut fmt::Formatter<'_>, dist: &TStatisticDistribution) -> fmt::Result {
    let stats = &dist.stats.stats;
    writeln!(f, "t_{} distribution ({} replicates)", dist.test, stats.count)?;
    writeln!(
        f,
        "  Mean: {:.4}  SD: {:.4}  Median: {:.4}  Min: {:.4}  Max: {:.4}",
        stats.mean, stats.std_dev, stats.median, stats.min, stats.max,
    )?;
    writeln!(
        f,
        "  Beyond critical values: {:.4} ({} / {})",
        dist.fraction_beyond_critical(),
        dist.beyond_critical,
        stats.count,
    )?;

    writeln!(f, "  {:>10} {:>10} {:>12}", "Percentile", "Empirical", "Student-t")?;
    for ((p, empirical), (_, theoretical)) in dist.stats.percentiles.iter().zip(&dist.theoretical) {
        writeln!(f, "  {p:>10.1} {empirical:>10.4} {theoretical:>12.4}")?;
    }

    writeln!(f, "  Histogram ({} values):", dist.stats.histogram.total_count())?;
    let (lower_bin, upper_bin) = dist.critical_bins();
    let max_count = dist.stats.histogram.max_count().max(1);
    for (i, bin) in dist.stats.histogram.bins.iter().enumerate() {
        let mut marker = String::new();
        if lower_bin == Some(i) {
            write!(marker, " <- {:.3}", dist.critical.lower)?;
        }
        if upper_bin == Some(i) {
            write!(marker, " <- {:.3}", dist.critical.upper)?;
        }
        write_bin(f, bin, max_count, &marker)?;
    }
    Ok(())
}

fn write_bin(f: &mut fmt::Formatter<'_>, bin: &HistogramBin, max_count: u64, marker: &str) -> fmt::Result {
    let bar_width = usize::try_from(bin.count * MAX_BAR_WIDTH / max_count).unwrap_or(0);
    let label = format!("[{:.3}, {:.3})", bin.range.start, bin.range.end);
    writeln!(
        f,
        "  {:>20} | {:<6} {}{}",
        label,
        bin.count,
        "#".repeat(bar_width),
        marker,
    )
}

#[cfg(test)]
mod tests {
    use winner_bias_engine::{ReplicateResult, ResultMatrix};
    use winner_bias_simulation::driver::ReplicationDriver;

    use super::*;

    #[test]
    fn test_report_lists_every_test_and_marks_critical_bins() {
        let params = SimulationParams {
            subjects: 20,
            replicates: 300,
            ..SimulationParams::default()
        };
        let matrix = ReplicationDriver::new(params).unwrap().run().unwrap();
        let summary = SimulationSummary::from_matrix(&matrix, 16).unwrap();
        let report = summary.to_string();

        for name in ["primary", "proposed", "correlation"] {
            assert!(report.contains(name), "missing {name}");
        }
        assert!(report.contains("t_primary distribution (300 replicates)"));
        assert!(report.contains("t_proposed distribution (300 replicates)"));
        assert_eq!(report.matches("Histogram (300 values):").count(), 2);
        let marker = format!("<- {:.3}", summary.critical.upper);
        assert_eq!(report.matches(&marker).count(), 2);
        assert!(report.contains("inflated"));
    }

    #[test]
    fn test_report_without_statistics() {
        let params = SimulationParams {
            replicates: 1,
            ..SimulationParams::default()
        };
        let matrix = ResultMatrix {
            params,
            replicates: vec![ReplicateResult {
                reject_primary: false,
                reject_proposed: false,
                reject_cor: false,
                t_primary: None,
                t_proposed: None,
                r_cor: None,
            }],
        };
        let report = SimulationSummary::from_matrix(&matrix, 10)
            .unwrap()
            .to_string();
        // Degenerate replicates count as non-rejections; only the conditional rate is undefined
        let correlation_row = report
            .lines()
            .find(|line| line.trim_start().starts_with("correlation"))
            .unwrap();
        assert!(correlation_row.contains("0.0000"));
        assert!(correlation_row.trim_end().ends_with("N/A"));
        assert_eq!(report.matches("(no non-degenerate t statistics)").count(), 2);
        assert!(!report.contains("inflated"));
    }
}
