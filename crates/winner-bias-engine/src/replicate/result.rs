use serde::{Deserialize, Serialize};

use crate::SimulationParams;

use super::{ReplicateResult, TestKind};

/// All replicate results of one simulation run, in replicate order.
///
/// The parameters travel with the results so a persisted matrix can be
/// summarized (degrees of freedom, significance level) without rerunning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMatrix {
    pub params: SimulationParams,
    pub replicates: Vec<ReplicateResult>,
}

impl ResultMatrix {
    #[must_use]
    pub fn len(&self) -> usize {
        self.replicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replicates.is_empty()
    }

    /// Number of replicates with at least one degenerate test.
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.replicates.iter().filter(|r| r.is_flagged()).count()
    }

    /// Number of replicates on which `test` was degenerate.
    #[must_use]
    pub fn degenerate_count(&self, test: TestKind) -> usize {
        self.replicates
            .iter()
            .filter(|r| r.is_degenerate(test))
            .count()
    }

    /// Primary t statistics of the non-degenerate replicates.
    pub fn t_primary(&self) -> impl Iterator<Item = f64> + '_ {
        self.replicates.iter().filter_map(|r| r.t_primary)
    }

    /// Proposed t statistics of the non-degenerate replicates.
    pub fn t_proposed(&self) -> impl Iterator<Item = f64> + '_ {
        self.replicates.iter().filter_map(|r| r.t_proposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replicate(t_primary: Option<f64>, r_cor: Option<f64>) -> ReplicateResult {
        ReplicateResult {
            reject_primary: t_primary.is_some_and(|t| t.abs() > 2.0),
            reject_proposed: false,
            reject_cor: false,
            t_primary,
            t_proposed: Some(0.1),
            r_cor,
        }
    }

    #[test]
    fn test_counts() {
        let matrix = ResultMatrix {
            params: SimulationParams::default(),
            replicates: vec![
                replicate(Some(2.5), Some(0.1)),
                replicate(None, Some(0.2)),
                replicate(None, None),
                replicate(Some(-1.0), Some(0.0)),
            ],
        };
        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix.flagged_count(), 2);
        assert_eq!(matrix.degenerate_count(TestKind::Primary), 2);
        assert_eq!(matrix.degenerate_count(TestKind::Correlation), 1);
        assert_eq!(matrix.degenerate_count(TestKind::Proposed), 0);
        assert_eq!(matrix.t_primary().collect::<Vec<_>>(), vec![2.5, -1.0]);
        assert_eq!(matrix.t_proposed().count(), 4);
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let matrix = ResultMatrix {
            params: SimulationParams::default(),
            replicates: vec![
                replicate(Some(0.1 + 0.2), Some(1.0 / 3.0)),
                replicate(Some(-2.000_000_000_000_001_3), None),
            ],
        };
        let json = serde_json::to_string_pretty(&matrix).unwrap();
        let reloaded: ResultMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, matrix);
        let bits = |m: &ResultMatrix| m.t_primary().map(f64::to_bits).collect::<Vec<_>>();
        assert_eq!(bits(&reloaded), bits(&matrix));
    }
}
