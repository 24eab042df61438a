//! Replication driver: runs the trial pipeline `B` times and collects the results.
//!
//! Each replicate follows the same three steps:
//!
//! 1. **Generate** - draw a cohort of `N` subjects under the null model
//! 2. **Select** - derive winner responses and the naive/confirmatory loser means
//! 3. **Test** - run the primary, proposed and correlation tests
//!
//! # Architecture
//!
//! ```text
//! master Pcg32 (seed)
//!     ↓ drawn sequentially, one per replicate
//! TrialSeed #0, #1, ..., #B-1
//!     ↓ dispatched to worker threads
//! Pcg32 per replicate → TrialGenerator → Cohort::select → evaluate_cohort
//!     ↓ stored by replicate index
//! ResultMatrix
//! ```
//!
//! # Reproducibility
//!
//! The master stream is only ever advanced on the calling thread, and always
//! in replicate order. Workers never share a generator: each replicate owns
//! the stream created from its own [`TrialSeed`](winner_bias_engine::TrialSeed).
//! The same parameters therefore produce a bit-identical
//! [`ResultMatrix`](winner_bias_engine::ResultMatrix) whatever the worker count.
//!
//! See the [`driver`] module for details.

pub mod driver;
