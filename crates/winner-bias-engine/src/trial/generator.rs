use rand::Rng;
use rand_distr::Normal;

use crate::{
    InvalidParameter,
    params::{validate_sigma, validate_subjects},
};

use super::{Cohort, PERIOD_COUNT, Subject};

/// Draws cohorts under the null model.
///
/// Every period response of every subject is an independent draw from
/// `Normal(0, sigma)`. Draws are taken subject by subject, periods `y1..y8`
/// in order, so a given random stream always yields the same cohort.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use winner_bias_engine::TrialGenerator;
///
/// let generator = TrialGenerator::new(10, 0.75).unwrap();
/// let first = generator.generate(&mut Pcg32::seed_from_u64(7));
/// let second = generator.generate(&mut Pcg32::seed_from_u64(7));
/// assert_eq!(first.select().winner_response.len(), 10);
/// assert_eq!(first, second);
///
/// assert!(TrialGenerator::new(1, 0.75).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrialGenerator {
    subjects: usize,
    normal: Normal<f64>,
}

impl TrialGenerator {
    pub fn new(subjects: usize, sigma: f64) -> Result<Self, InvalidParameter> {
        validate_subjects(subjects)?;
        validate_sigma(sigma)?;
        let normal = Normal::new(0.0, sigma)
            .map_err(|e| InvalidParameter::new("sigma", e.to_string()))?;
        Ok(Self { subjects, normal })
    }

    /// Draws one subject.
    pub fn generate_subject<R>(&self, rng: &mut R) -> Subject
    where
        R: Rng + ?Sized,
    {
        let mut periods = [0.0; PERIOD_COUNT];
        for period in &mut periods {
            *period = rng.sample(self.normal);
        }
        Subject::new(periods)
    }

    /// Draws a full cohort.
    pub fn generate<R>(&self, rng: &mut R) -> Cohort
    where
        R: Rng + ?Sized,
    {
        let subjects = (0..self.subjects)
            .map(|_| self.generate_subject(rng))
            .collect();
        Cohort::from_subjects(subjects)
    }
}
