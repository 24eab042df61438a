//! Core simulation pipeline for one trial replicate.
//!
//! - [`trial`]: null-model data generation and the winner/loser selection rule
//! - [`replicate`]: the per-replicate hypothesis tests and the result types
//!   collected by the replication driver
//! - [`SimulationParams`]: the invocation parameters shared by every stage
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use winner_bias_engine::{SimulationParams, TrialGenerator, evaluate_cohort};
//!
//! let params = SimulationParams::default();
//! let generator = TrialGenerator::new(params.subjects, params.sigma).unwrap();
//! let mut rng = Pcg32::seed_from_u64(params.seed);
//!
//! let cohort = generator.generate(&mut rng);
//! let result = evaluate_cohort(&cohort.select(), params.alpha).unwrap();
//! assert!(result.t_primary.is_some());
//! ```

pub use self::{params::*, replicate::*, trial::*};

mod params;
pub mod replicate;
pub mod trial;
