//! Aggregation and reporting of simulation results.
//!
//! Turns a [`ResultMatrix`](winner_bias_engine::ResultMatrix) into the
//! quantities the simulation exists to measure:
//!
//! - [`rates`]: empirical rejection rate of each test with its Monte-Carlo error
//! - [`statistic`]: distribution of the primary and proposed t statistics next
//!   to the Student-t reference distribution
//! - [`summary`]: everything above for one matrix, plus a plain-text rendering
//!
//! The matrix is only read; nothing here consumes randomness.

pub mod rates;
mod report;
pub mod statistic;
pub mod summary;
