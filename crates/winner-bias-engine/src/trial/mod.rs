//! Null-model trial data and the winner/loser selection rule.
//!
//! Every simulated subject passes through eight periods:
//!
//! ```text
//! y1 y2 y3 y4 | y5                  | y6 y7 y8
//! selection   | confirmatory winner | confirmatory losers
//! ```
//!
//! The treatment with the largest response among the selection periods is the
//! subject's "winner"; the remaining three are its "losers". The naive loser
//! mean reuses the selection periods, while the confirmatory loser mean comes
//! from independently drawn periods.
//!
//! - [`TrialGenerator`] - draws a [`Cohort`] of subjects under the null model
//! - [`Subject`] - eight period responses of one participant
//! - [`Selection`] / [`CohortSelection`] - derived winner and loser quantities
//! - [`TrialSeed`] - seed of one replicate's private random stream

pub use self::{cohort::*, generator::*, seed::*, subject::*};

mod cohort;
mod generator;
mod seed;
mod subject;
