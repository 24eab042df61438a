//! Everything reported for one simulation run.
//!
//! # Examples
//!
//! ```
//! use winner_bias_analysis::summary::SimulationSummary;
//! use winner_bias_engine::{SimulationParams, TestKind};
//! use winner_bias_simulation::driver::ReplicationDriver;
//!
//! let params = SimulationParams {
//!     subjects: 30,
//!     replicates: 200,
//!     ..SimulationParams::default()
//! };
//! let matrix = ReplicationDriver::new(params).unwrap().run().unwrap();
//! let summary = SimulationSummary::from_matrix(&matrix, 20).unwrap();
//!
//! let primary = summary.rate(TestKind::Primary).rate().unwrap();
//! let proposed = summary.rate(TestKind::Proposed).rate().unwrap();
//! assert!(primary > proposed);
//! println!("{summary}");
//! ```

use winner_bias_engine::{InvalidParameter, ResultMatrix, SimulationParams, TestKind};
use winner_bias_stats::distribution::InvalidDegreesOfFreedom;

use crate::{
    rates::RejectionRate,
    statistic::{CriticalValues, TStatisticDistribution},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("result matrix has invalid parameters: {_0}")]
    InvalidParameter(InvalidParameter),
    #[display("result matrix holds {actual} replicates but its parameters declare {expected}")]
    ReplicateCountMismatch { expected: usize, actual: usize },
    #[display("cannot derive critical values: {_0}")]
    DegreesOfFreedom(InvalidDegreesOfFreedom),
}

/// Rejection rates, critical values and t-statistic distributions of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub params: SimulationParams,
    pub replicates: usize,
    /// Replicates with at least one degenerate test.
    pub flagged: usize,
    /// One entry per test, in [`TestKind::ALL`] order.
    pub rates: [RejectionRate; 3],
    /// Critical values of the paired t-tests (`df = N - 1`).
    pub critical: CriticalValues,
    pub t_primary: Option<TStatisticDistribution>,
    pub t_proposed: Option<TStatisticDistribution>,
}

impl SimulationSummary {
    /// Aggregates `matrix`, using `num_bins` main bins for each histogram.
    ///
    /// The matrix may come from disk, so its parameters are validated again.
    pub fn from_matrix(matrix: &ResultMatrix, num_bins: usize) -> Result<Self, AnalysisError> {
        let params = matrix.params;
        params.validate().map_err(AnalysisError::InvalidParameter)?;
        if matrix.len() != params.replicates {
            return Err(AnalysisError::ReplicateCountMismatch {
                expected: params.replicates,
                actual: matrix.len(),
            });
        }

        let critical = CriticalValues::new(params.paired_df(), params.alpha)
            .map_err(AnalysisError::DegreesOfFreedom)?;
        let rates = TestKind::ALL.map(|test| RejectionRate::from_matrix(matrix, test));
        let t_primary =
            TStatisticDistribution::from_matrix(matrix, TestKind::Primary, critical, num_bins);
        let t_proposed =
            TStatisticDistribution::from_matrix(matrix, TestKind::Proposed, critical, num_bins);

        Ok(Self {
            params,
            replicates: matrix.len(),
            flagged: matrix.flagged_count(),
            rates,
            critical,
            t_primary,
            t_proposed,
        })
    }

    #[must_use]
    pub fn rate(&self, test: TestKind) -> &RejectionRate {
        let index = match test {
            TestKind::Primary => 0,
            TestKind::Proposed => 1,
            TestKind::Correlation => 2,
        };
        &self.rates[index]
    }

    /// The t-statistic distributions that could be computed.
    pub fn distributions(&self) -> impl Iterator<Item = &TStatisticDistribution> {
        [&self.t_primary, &self.t_proposed]
            .into_iter()
            .filter_map(Option::as_ref)
    }
}
