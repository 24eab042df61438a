use std::fmt;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

/// Seed of one replicate's private random stream.
///
/// This is a 128-bit (16-byte) seed for a [`Pcg32`] generator. The replication
/// driver draws one `TrialSeed` per replicate from the master stream, in
/// replicate order, before any replicate runs. Each replicate then consumes
/// only its own stream, so the results do not depend on how replicates are
/// scheduled across threads.
///
/// # Example
///
/// ```
/// use rand::{Rng as _, SeedableRng as _};
/// use rand_pcg::Pcg32;
/// use winner_bias_engine::TrialSeed;
///
/// let mut master = Pcg32::seed_from_u64(29);
/// let seed: TrialSeed = master.random();
///
/// // The same seed always yields the same stream
/// let a: u64 = seed.rng().random();
/// let b: u64 = seed.rng().random();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrialSeed([u8; 16]);

impl TrialSeed {
    /// Creates the random stream for this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

/// Formats the seed as 32 hex digits.
impl fmt::Display for TrialSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Allows generating random `TrialSeed` values using the standard random distribution.
impl Distribution<TrialSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TrialSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TrialSeed(seed)
    }
}
