//! Sequential and multi-threaded execution of a simulation run.
//!
//! # Example
//!
//! ```
//! use winner_bias_engine::SimulationParams;
//! use winner_bias_simulation::driver::ReplicationDriver;
//!
//! let params = SimulationParams {
//!     subjects: 20,
//!     replicates: 50,
//!     ..SimulationParams::default()
//! };
//! let single = ReplicationDriver::new(params).unwrap().run().unwrap();
//! let threaded = ReplicationDriver::new(params)
//!     .unwrap()
//!     .with_workers(4)
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(single.len(), 50);
//! assert_eq!(single, threaded);
//! ```

use std::{panic, thread};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use winner_bias_engine::{
    InvalidParameter, ReplicateResult, ResultMatrix, SimulationParams, TrialGenerator, TrialSeed,
    evaluate_cohort,
};
use winner_bias_stats::inference::InferenceError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("replicate #{replicate}: {source}")]
    Inference {
        replicate: usize,
        source: InferenceError,
    },
}

/// Runs the generate → select → test pipeline once per replicate.
#[derive(Debug, Clone)]
pub struct ReplicationDriver {
    params: SimulationParams,
    generator: TrialGenerator,
    workers: usize,
}

impl ReplicationDriver {
    /// Creates a single-threaded driver after validating `params`.
    pub fn new(params: SimulationParams) -> Result<Self, InvalidParameter> {
        params.validate()?;
        let generator = TrialGenerator::new(params.subjects, params.sigma)?;
        Ok(Self {
            params,
            generator,
            workers: 1,
        })
    }

    /// Spreads the replicates over `workers` threads.
    ///
    /// The results are identical to a single-threaded run.
    pub fn with_workers(self, workers: usize) -> Result<Self, InvalidParameter> {
        if workers == 0 {
            return Err(InvalidParameter::new(
                "workers",
                "at least one worker is required",
            ));
        }
        Ok(Self { workers, ..self })
    }

    #[must_use]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Draws the per-replicate seeds from the master stream, in replicate order.
    #[must_use]
    pub fn replicate_seeds(&self) -> Vec<TrialSeed> {
        let mut master = Pcg32::seed_from_u64(self.params.seed);
        (0..self.params.replicates)
            .map(|_| master.random())
            .collect()
    }

    /// Runs a single replicate from its seed.
    ///
    /// `index` only labels diagnostics; the outcome depends on `seed` alone.
    pub fn run_replicate(
        &self,
        index: usize,
        seed: TrialSeed,
    ) -> Result<ReplicateResult, SimulationError> {
        let mut rng = seed.rng();
        let cohort = self.generator.generate(&mut rng);
        let result = evaluate_cohort(&cohort.select(), self.params.alpha).map_err(|source| {
            SimulationError::Inference {
                replicate: index,
                source,
            }
        })?;
        if result.is_flagged() {
            let tests = result
                .degenerate_tests()
                .map(|test| test.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(replicate = index, %seed, "degenerate sample in {tests} test");
        }
        Ok(result)
    }

    /// Runs every replicate and collects the results in replicate order.
    pub fn run(&self) -> Result<ResultMatrix, SimulationError> {
        let seeds = self.replicate_seeds();
        tracing::debug!(
            subjects = self.params.subjects,
            replicates = self.params.replicates,
            workers = self.workers,
            seed = self.params.seed,
            "starting simulation"
        );

        let replicates = if self.workers == 1 {
            seeds
                .iter()
                .enumerate()
                .map(|(index, seed)| self.run_replicate(index, *seed))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.run_parallel(&seeds)?
        };

        let matrix = ResultMatrix {
            params: self.params,
            replicates,
        };
        tracing::debug!(flagged = matrix.flagged_count(), "simulation finished");
        Ok(matrix)
    }

    fn run_parallel(&self, seeds: &[TrialSeed]) -> Result<Vec<ReplicateResult>, SimulationError> {
        let mut slots = vec![None; seeds.len()];
        let chunk_size = seeds.len().div_ceil(self.workers).max(1);

        thread::scope(|s| {
            let handles = seeds
                .chunks(chunk_size)
                .zip(slots.chunks_mut(chunk_size))
                .enumerate()
                .map(|(chunk_index, (seeds, slots))| {
                    s.spawn(move || -> Result<(), SimulationError> {
                        let first = chunk_index * chunk_size;
                        for (offset, (seed, slot)) in seeds.iter().zip(slots).enumerate() {
                            *slot = Some(self.run_replicate(first + offset, *seed)?);
                        }
                        Ok(())
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect::<Result<(), _>>()
        })?;

        let replicates = slots.into_iter().flatten().collect::<Vec<_>>();
        debug_assert_eq!(replicates.len(), seeds.len());
        Ok(replicates)
    }
}

#[cfg(test)]
mod tests {
    use winner_bias_engine::TestKind;

    use super::*;

    fn small_params(seed: u64) -> SimulationParams {
        SimulationParams {
            subjects: 12,
            replicates: 40,
            seed,
            ..SimulationParams::default()
        }
    }

    fn bits(matrix: &ResultMatrix) -> Vec<(Option<u64>, Option<u64>, Option<u64>)> {
        matrix
            .replicates
            .iter()
            .map(|r| {
                (
                    r.t_primary.map(f64::to_bits),
                    r.t_proposed.map(f64::to_bits),
                    r.r_cor.map(f64::to_bits),
                )
            })
            .collect()
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = ReplicationDriver::new(small_params(29)).unwrap().run().unwrap();
        let b = ReplicationDriver::new(small_params(29)).unwrap().run().unwrap();
        assert_eq!(a, b);
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_worker_count_does_not_change_results() {
        let reference = ReplicationDriver::new(small_params(7)).unwrap().run().unwrap();
        for workers in [2, 3, 8, 64] {
            let matrix = ReplicationDriver::new(small_params(7))
                .unwrap()
                .with_workers(workers)
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(bits(&matrix), bits(&reference), "workers = {workers}");
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = ReplicationDriver::new(small_params(1)).unwrap().run().unwrap();
        let b = ReplicationDriver::new(small_params(2)).unwrap().run().unwrap();
        assert_ne!(bits(&a), bits(&b));
    }

    #[test]
    fn test_prefix_is_stable_when_adding_replicates() {
        let short = ReplicationDriver::new(small_params(3)).unwrap().run().unwrap();
        let long = ReplicationDriver::new(SimulationParams {
            replicates: 80,
            ..small_params(3)
        })
        .unwrap()
        .run()
        .unwrap();
        assert_eq!(bits(&short)[..], bits(&long)[..40]);
    }

    #[test]
    fn test_replicate_can_be_replayed_from_its_seed() {
        let driver = ReplicationDriver::new(small_params(5)).unwrap();
        let matrix = driver.run().unwrap();
        let seeds = driver.replicate_seeds();
        let replayed = driver.run_replicate(17, seeds[17]).unwrap();
        assert_eq!(replayed, matrix.replicates[17]);
    }

    #[test]
    fn test_matrix_carries_params() {
        let params = small_params(9);
        let matrix = ReplicationDriver::new(params).unwrap().run().unwrap();
        assert_eq!(matrix.params, params);
        assert_eq!(matrix.len(), params.replicates);
        assert_eq!(matrix.flagged_count(), 0);
    }

    #[test]
    fn test_invalid_parameters_fail_before_running() {
        let err = ReplicationDriver::new(SimulationParams {
            subjects: 1,
            ..SimulationParams::default()
        })
        .unwrap_err();
        assert_eq!(err.name, "subjects");

        let err = ReplicationDriver::new(SimulationParams::default())
            .unwrap()
            .with_workers(0)
            .unwrap_err();
        assert_eq!(err.name, "workers");
    }

    #[test]
    fn test_two_subjects_flag_correlation_only() {
        let params = SimulationParams {
            subjects: 2,
            replicates: 10,
            ..SimulationParams::default()
        };
        let matrix = ReplicationDriver::new(params).unwrap().run().unwrap();
        assert!(matrix.replicates.iter().all(|r| r.r_cor.is_none()));
        assert!(matrix.replicates.iter().all(|r| r.t_primary.is_some()));
        assert_eq!(matrix.flagged_count(), 10);
    }

    #[test]
    fn test_overflowing_responses_are_flagged_not_nan() {
        let params = SimulationParams {
            subjects: 10,
            replicates: 20,
            sigma: 1e160,
            ..SimulationParams::default()
        };
        let matrix = ReplicationDriver::new(params).unwrap().run().unwrap();
        for r in &matrix.replicates {
            for value in [r.t_primary, r.t_proposed, r.r_cor].into_iter().flatten() {
                assert!(!value.is_nan());
            }
            assert!(r.r_cor.is_none());
            assert!(r.is_degenerate(TestKind::Correlation));
            assert!(!r.reject_cor);
        }
        assert_eq!(matrix.degenerate_count(TestKind::Correlation), 20);
    }
}
