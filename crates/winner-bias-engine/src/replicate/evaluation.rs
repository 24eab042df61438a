use std::fmt;

use serde::{Deserialize, Serialize};
use winner_bias_stats::inference::{self, InferenceError, TestOutcome};

use crate::trial::CohortSelection;

/// The three tests run on every replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    /// Paired t-test of `y5` against the naive loser mean.
    Primary,
    /// Paired t-test of `y5` against the confirmatory loser mean.
    Proposed,
    /// Pearson correlation test between the winner response and `y5`.
    Correlation,
}

impl TestKind {
    pub const ALL: [Self; 3] = [Self::Primary, Self::Proposed, Self::Correlation];
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::Proposed => "proposed",
            Self::Correlation => "correlation",
        };
        f.write_str(name)
    }
}

/// Outcome of one simulated trial.
///
/// A statistic is `None` when the test's input had zero variance
/// ([`InferenceError::DegenerateSample`]); the matching rejection flag is then
/// `false` and the replicate counts as flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicateResult {
    pub reject_primary: bool,
    pub reject_proposed: bool,
    pub reject_cor: bool,
    pub t_primary: Option<f64>,
    pub t_proposed: Option<f64>,
    /// Pearson correlation between the winner response and `y5`.
    pub r_cor: Option<f64>,
}

impl ReplicateResult {
    #[must_use]
    pub fn rejects(&self, test: TestKind) -> bool {
        match test {
            TestKind::Primary => self.reject_primary,
            TestKind::Proposed => self.reject_proposed,
            TestKind::Correlation => self.reject_cor,
        }
    }

    /// Whether `test` could not be evaluated on this replicate.
    #[must_use]
    pub fn is_degenerate(&self, test: TestKind) -> bool {
        match test {
            TestKind::Primary => self.t_primary.is_none(),
            TestKind::Proposed => self.t_proposed.is_none(),
            TestKind::Correlation => self.r_cor.is_none(),
        }
    }

    /// Whether any of the three tests was degenerate.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        TestKind::ALL.iter().any(|test| self.is_degenerate(*test))
    }

    pub fn degenerate_tests(&self) -> impl Iterator<Item = TestKind> + '_ {
        TestKind::ALL
            .into_iter()
            .filter(|test| self.is_degenerate(*test))
    }
}

/// Runs the primary, proposed and correlation tests on one cohort.
///
/// All three tests are two-sided and reject when `p < alpha`. Degenerate
/// samples are absorbed into the result (see [`ReplicateResult`]); any other
/// inference error, such as a cohort too small for a test, is returned.
///
/// # Examples
///
/// ```
/// use winner_bias_engine::{Cohort, Subject, evaluate_cohort};
///
/// // Every subject identical: no test has any variance to work with
/// let cohort = Cohort::from_subjects(vec![Subject::new([0.5; 8]); 10]);
/// let result = evaluate_cohort(&cohort.select(), 0.05).unwrap();
/// assert!(result.is_flagged());
/// assert_eq!(result.t_primary, None);
/// assert!(!result.reject_primary);
/// ```
pub fn evaluate_cohort(
    selection: &CohortSelection,
    alpha: f64,
) -> Result<ReplicateResult, InferenceError> {
    let primary = allow_degenerate(inference::paired_t_test(
        &selection.confirmatory_winner,
        &selection.loser_mean_naive,
    ))?;
    let proposed = allow_degenerate(inference::paired_t_test(
        &selection.confirmatory_winner,
        &selection.loser_mean_confirmatory,
    ))?;
    let correlation = allow_degenerate(inference::pearson_correlation_test(
        &selection.winner_response,
        &selection.confirmatory_winner,
    ))?;

    let rejects = |outcome: Option<&TestOutcome>| outcome.is_some_and(|o| o.rejects(alpha));

    Ok(ReplicateResult {
        reject_primary: rejects(primary.as_ref()),
        reject_proposed: rejects(proposed.as_ref()),
        reject_cor: rejects(correlation.as_ref().map(|c| &c.test)),
        t_primary: primary.map(|o| o.statistic),
        t_proposed: proposed.map(|o| o.statistic),
        r_cor: correlation.map(|c| c.r),
    })
}

fn allow_degenerate<T>(result: Result<T, InferenceError>) -> Result<Option<T>, InferenceError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InferenceError::DegenerateSample) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use winner_bias_stats::distribution::StudentsT;

    use super::*;
    use crate::{Cohort, Subject, TrialGenerator};

    #[test]
    fn test_constant_cohort_is_flagged_for_every_test() {
        let cohort = Cohort::from_subjects(vec![Subject::new([1.25; 8]); 63]);
        let result = evaluate_cohort(&cohort.select(), 0.05).unwrap();
        assert_eq!(
            result.degenerate_tests().collect::<Vec<_>>(),
            TestKind::ALL.to_vec()
        );
        assert!(!result.reject_primary && !result.reject_proposed && !result.reject_cor);
    }

    #[test]
    fn test_rejection_matches_critical_value() {
        let generator = TrialGenerator::new(63, 0.75).unwrap();
        let critical = StudentsT::new(62.0).unwrap().two_sided_critical_value(0.05);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let result = evaluate_cohort(&generator.generate(&mut rng).select(), 0.05).unwrap();
            let t_primary = result.t_primary.unwrap();
            let t_proposed = result.t_proposed.unwrap();
            assert_eq!(result.reject_primary, t_primary.abs() > critical);
            assert_eq!(result.reject_proposed, t_proposed.abs() > critical);
            assert!(!result.is_flagged());
        }
    }

    #[test]
    fn test_primary_statistic_is_biased_upwards() {
        // The naive loser mean excludes the maximum, so y5 exceeds it on average
        let generator = TrialGenerator::new(63, 0.75).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let positive = (0..200)
            .filter(|_| {
                let result =
                    evaluate_cohort(&generator.generate(&mut rng).select(), 0.05).unwrap();
                result.t_primary.unwrap() > 0.0
            })
            .count();
        assert!(positive > 190, "{positive}");
    }

    #[test]
    fn test_degenerate_only_where_variance_vanishes() {
        // y5 and the confirmatory losers move together, selection periods vary
        let subjects = (0..10)
            .map(|i| {
                let v = f64::from(i);
                Subject::new([v, -v, 0.5 * v, 1.0, v, v, v, v])
            })
            .collect();
        let result = evaluate_cohort(&Cohort::from_subjects(subjects).select(), 0.05).unwrap();
        assert!(result.is_degenerate(TestKind::Proposed));
        assert!(!result.is_degenerate(TestKind::Primary));
        assert!(!result.is_degenerate(TestKind::Correlation));
    }

    #[test]
    fn test_too_small_cohort_is_an_error() {
        let cohort = Cohort::from_subjects(vec![Subject::new([0.0; 8])]);
        assert!(matches!(
            evaluate_cohort(&cohort.select(), 0.05),
            Err(InferenceError::TooFewObservations { .. })
        ));
    }

    #[test]
    fn test_serialized_form() {
        let result = ReplicateResult {
            reject_primary: true,
            reject_proposed: false,
            reject_cor: false,
            t_primary: Some(2.5),
            t_proposed: None,
            r_cor: Some(-0.125),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"reject_primary":true,"reject_proposed":false,"reject_cor":false,"t_primary":2.5,"t_proposed":null,"r_cor":-0.125}"#
        );
        assert_eq!(serde_json::from_str::<ReplicateResult>(&json).unwrap(), result);
    }
}
