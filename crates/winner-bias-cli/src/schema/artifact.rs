use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use winner_bias_engine::ResultMatrix;

/// Result matrix as persisted by `simulate` and read back by `report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationArtifact {
    /// Timestamp when the simulation finished (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Parameters and per-replicate results of the run
    pub result: ResultMatrix,
}

impl SimulationArtifact {
    pub fn new(result: ResultMatrix) -> Self {
        Self {
            generated_at: Utc::now(),
            result,
        }
    }
}
