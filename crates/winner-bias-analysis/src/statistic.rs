//! Empirical distribution of the paired t statistics.
//!
//! Under the null model the proposed statistic should follow Student's t with
//! `N - 1` degrees of freedom. The primary statistic is shifted to the right
//! by the selection bias. [`TStatisticDistribution`] keeps the empirical
//! percentiles next to the theoretical quantiles so the two can be compared
//! point by point.

use winner_bias_engine::{ResultMatrix, TestKind};
use winner_bias_stats::{
    comprehensive::ComprehensiveStats,
    distribution::{InvalidDegreesOfFreedom, StudentsT},
    percentiles,
};

/// Percentile points reported for each statistic.
pub const PERCENTILE_POINTS: [f64; 7] = [2.5, 5.0, 25.0, 50.0, 75.0, 95.0, 97.5];

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Two-sided critical values `±t_{1 - alpha/2, df}`.
///
/// # Examples
///
/// ```
/// use winner_bias_analysis::statistic::CriticalValues;
///
/// let critical = CriticalValues::new(62.0, 0.05).unwrap();
/// assert!((critical.upper - 1.998_971_517).abs() < 1e-8);
/// assert_eq!(critical.lower, -critical.upper);
/// assert!(critical.is_beyond(-2.5));
/// assert!(!critical.is_beyond(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub alpha: f64,
    pub df: f64,
    pub lower: f64,
    pub upper: f64,
}

impl CriticalValues {
    pub fn new(df: f64, alpha: f64) -> Result<Self, InvalidDegreesOfFreedom> {
        let upper = StudentsT::new(df)?.two_sided_critical_value(alpha);
        Ok(Self {
            alpha,
            df,
            lower: -upper,
            upper,
        })
    }

    /// Whether `t` falls in the rejection region.
    #[must_use]
    pub fn is_beyond(&self, t: f64) -> bool {
        t < self.lower || t > self.upper
    }
}

/// Summary of one t statistic over all non-degenerate replicates.
#[derive(Debug, Clone, PartialEq)]
pub struct TStatisticDistribution {
    pub test: TestKind,
    pub stats: ComprehensiveStats,
    /// `(percentile, quantile)` pairs of the reference Student-t distribution,
    /// at [`PERCENTILE_POINTS`].
    pub theoretical: Vec<(f64, f64)>,
    pub critical: CriticalValues,
    /// Number of statistics in the rejection region.
    pub beyond_critical: usize,
}

impl TStatisticDistribution {
    /// Summarizes `values` against the t distribution described by `critical`.
    ///
    /// The histogram's main range always covers both critical values, so the
    /// bins holding them can be marked. Returns `None` if `values` is empty or
    /// holds a non-finite value.
    #[must_use]
    pub fn new<I>(test: TestKind, values: I, critical: CriticalValues, num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        if sorted.is_empty() || sorted.iter().any(|v| !v.is_finite()) {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let lo = percentiles::compute_percentile(&sorted, 2.5).min(critical.lower);
        let hi = percentiles::compute_percentile(&sorted, 97.5).max(critical.upper);
        let pad = 0.05 * (hi - lo);
        let stats = ComprehensiveStats::from_sorted(
            &sorted,
            &PERCENTILE_POINTS,
            num_bins,
            Some(lo - pad),
            Some(hi + pad),
        )?;

        let reference = StudentsT::new(critical.df).ok()?;
        let theoretical = PERCENTILE_POINTS
            .iter()
            .map(|&p| (p, reference.inverse_cdf(p / 100.0)))
            .collect();
        let beyond_critical = sorted.iter().filter(|t| critical.is_beyond(**t)).count();

        Some(Self {
            test,
            stats,
            theoretical,
            critical,
            beyond_critical,
        })
    }

    /// Summarizes the `test` statistics of `matrix`.
    ///
    /// Only the primary and proposed tests carry a t statistic; `Correlation`
    /// yields `None`, as does a matrix without any non-degenerate replicate.
    #[must_use]
    pub fn from_matrix(
        matrix: &ResultMatrix,
        test: TestKind,
        critical: CriticalValues,
        num_bins: usize,
    ) -> Option<Self> {
        match test {
            TestKind::Primary => Self::new(test, matrix.t_primary(), critical, num_bins),
            TestKind::Proposed => Self::new(test, matrix.t_proposed(), critical, num_bins),
            TestKind::Correlation => None,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.stats.stats.count
    }

    /// Fraction of statistics beyond the critical values.
    ///
    /// Matches the test's rejection rate up to ties at the boundary.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction_beyond_critical(&self) -> f64 {
        self.beyond_critical as f64 / self.count() as f64
    }

    /// Indices of the histogram bins holding the lower and upper critical values.
    #[must_use]
    pub fn critical_bins(&self) -> (Option<usize>, Option<usize>) {
        let histogram = &self.stats.histogram;
        (
            histogram.bin_index(self.critical.lower),
            histogram.bin_index(self.critical.upper),
        )
    }
}
