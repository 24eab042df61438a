//! Empirical rejection rates.

use winner_bias_engine::{ResultMatrix, TestKind};

/// Standard normal quantile for a two-sided 95 % interval.
const Z_95: f64 = 1.959_963_984_540_054;

/// How often one test rejected across a simulation run.
///
/// A degenerate replicate never rejects, so [`rate`](Self::rate) counts it as
/// a non-rejection out of all `B` replicates.
/// [`conditional_rate`](Self::conditional_rate) leaves it out instead.
///
/// # Examples
///
/// ```
/// use winner_bias_analysis::rates::RejectionRate;
/// use winner_bias_engine::TestKind;
///
/// let rate = RejectionRate {
///     test: TestKind::Proposed,
///     rejections: 50,
///     evaluated: 1000,
///     degenerate: 0,
/// };
/// assert_eq!(rate.rate(), Some(0.05));
/// let (lo, hi) = rate.confidence_interval().unwrap();
/// assert!(lo < 0.05 && 0.05 < hi);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RejectionRate {
    pub test: TestKind,
    pub rejections: usize,
    /// Replicates on which the test produced a statistic.
    pub evaluated: usize,
    pub degenerate: usize,
}

impl RejectionRate {
    #[must_use]
    pub fn from_matrix(matrix: &ResultMatrix, test: TestKind) -> Self {
        let degenerate = matrix.degenerate_count(test);
        let rejections = matrix
            .replicates
            .iter()
            .filter(|r| r.rejects(test))
            .count();
        Self {
            test,
            rejections,
            evaluated: matrix.len() - degenerate,
            degenerate,
        }
    }

    /// Total number of replicates `B`.
    #[must_use]
    pub fn replicates(&self) -> usize {
        self.evaluated + self.degenerate
    }

    /// `rejections / B`, or `None` for an empty run.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        let replicates = self.replicates();
        (replicates > 0).then(|| self.rejections as f64 / replicates as f64)
    }

    /// `rejections / evaluated`, or `None` if no replicate could be evaluated.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn conditional_rate(&self) -> Option<f64> {
        (self.evaluated > 0).then(|| self.rejections as f64 / self.evaluated as f64)
    }

    /// Monte-Carlo standard error `sqrt(p (1 - p) / B)` of [`rate`](Self::rate).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn standard_error(&self) -> Option<f64> {
        let p = self.rate()?;
        Some((p * (1.0 - p) / self.replicates() as f64).sqrt())
    }

    /// Normal-approximation 95 % confidence interval, clipped to `[0, 1]`.
    #[must_use]
    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        let p = self.rate()?;
        let se = self.standard_error()?;
        Some(((p - Z_95 * se).max(0.0), (p + Z_95 * se).min(1.0)))
    }

    /// Whether the whole confidence interval lies above `alpha`.
    #[must_use]
    pub fn exceeds(&self, alpha: f64) -> bool {
        self.confidence_interval().is_some_and(|(lo, _)| lo > alpha)
    }
}

#[cfg(test)]
mod tests {
    use winner_bias_engine::{ReplicateResult, SimulationParams};

    use super::*;

    fn replicate(reject_primary: bool, t_primary: Option<f64>) -> ReplicateResult {
        ReplicateResult {
            reject_primary,
            reject_proposed: false,
            reject_cor: false,
            t_primary,
            t_proposed: Some(0.0),
            r_cor: Some(0.0),
        }
    }

    #[test]
    fn test_degenerate_replicates_count_as_non_rejections() {
        let matrix = ResultMatrix {
            params: SimulationParams::default(),
            replicates: vec![
                replicate(true, Some(3.0)),
                replicate(false, Some(0.5)),
                replicate(false, None),
                replicate(true, Some(-2.5)),
            ],
        };
        let rate = RejectionRate::from_matrix(&matrix, TestKind::Primary);
        assert_eq!(rate.rejections, 2);
        assert_eq!(rate.evaluated, 3);
        assert_eq!(rate.degenerate, 1);
        assert_eq!(rate.replicates(), 4);
        assert_eq!(rate.rate(), Some(0.5));
        assert_eq!(rate.conditional_rate(), Some(2.0 / 3.0));
        let se = rate.standard_error().unwrap();
        assert!((se - (0.25_f64 / 4.0).sqrt()).abs() < 1e-15);

        let proposed = RejectionRate::from_matrix(&matrix, TestKind::Proposed);
        assert_eq!(proposed.rate(), Some(0.0));
        assert_eq!(proposed.standard_error(), Some(0.0));
    }

    #[test]
    fn test_nothing_evaluated() {
        let rate = RejectionRate {
            test: TestKind::Correlation,
            rejections: 0,
            evaluated: 0,
            degenerate: 10,
        };
        assert_eq!(rate.rate(), Some(0.0));
        assert_eq!(rate.conditional_rate(), None);
        assert_eq!(rate.standard_error(), Some(0.0));
        assert_eq!(rate.confidence_interval(), Some((0.0, 0.0)));
        assert!(!rate.exceeds(0.05));
    }

    #[test]
    fn test_empty_run() {
        let rate = RejectionRate {
            test: TestKind::Primary,
            rejections: 0,
            evaluated: 0,
            degenerate: 0,
        };
        assert_eq!(rate.rate(), None);
        assert_eq!(rate.conditional_rate(), None);
        assert_eq!(rate.confidence_interval(), None);
        assert!(!rate.exceeds(0.05));
    }

    #[test]
    fn test_standard_error_and_interval() {
        let rate = RejectionRate {
            test: TestKind::Primary,
            rejections: 3350,
            evaluated: 5000,
            degenerate: 0,
        };
        let se = rate.standard_error().unwrap();
        assert!((se - (0.67 * 0.33 / 5000.0_f64).sqrt()).abs() < 1e-15);
        let (lo, hi) = rate.confidence_interval().unwrap();
        assert!((lo - (0.67 - Z_95 * se)).abs() < 1e-12);
        assert!((hi - (0.67 + Z_95 * se)).abs() < 1e-12);
        assert!(rate.exceeds(0.05));
    }

    #[test]
    fn test_interval_is_clipped() {
        let rate = RejectionRate {
            test: TestKind::Primary,
            rejections: 1,
            evaluated: 3,
            degenerate: 0,
        };
        let (lo, hi) = rate.confidence_interval().unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi < 1.0);
    }
}
