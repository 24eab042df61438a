//! Per-replicate hypothesis tests and the results they produce.
//!
//! - [`evaluate_cohort`] - runs the three tests on one cohort's selections
//! - [`ReplicateResult`] - rejection decisions and statistics of one replicate
//! - [`ResultMatrix`] - all replicates of a run together with its parameters

pub use self::{evaluation::*, result::*};

mod evaluation;
mod result;
