use serde::{Deserialize, Serialize};

/// A parameter value rejected before any simulation work starts.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("invalid parameter `{name}`: {reason}")]
pub struct InvalidParameter {
    pub name: &'static str,
    pub reason: String,
}

impl InvalidParameter {
    pub fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

/// Invocation parameters of a simulation run.
///
/// The defaults reproduce the reference scenario: 63 subjects, 5000
/// replicates, `alpha = 0.05`, `sigma = 0.75`, seed 29.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Cohort size `N` (subjects per simulated trial).
    pub subjects: usize,
    /// Number of simulated trials `B`.
    pub replicates: usize,
    /// Two-sided significance level.
    pub alpha: f64,
    /// Standard deviation of every period response under the null model.
    pub sigma: f64,
    /// Seed of the master random stream.
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SimulationParams {
    pub const DEFAULT: Self = Self {
        subjects: 63,
        replicates: 5000,
        alpha: 0.05,
        sigma: 0.75,
        seed: 29,
    };

    /// Checks every parameter, naming the first offending one.
    ///
    /// # Examples
    ///
    /// ```
    /// use winner_bias_engine::SimulationParams;
    ///
    /// assert!(SimulationParams::default().validate().is_ok());
    ///
    /// let params = SimulationParams { subjects: 1, ..SimulationParams::default() };
    /// assert_eq!(params.validate().unwrap_err().name, "subjects");
    /// ```
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        validate_subjects(self.subjects)?;
        if self.replicates == 0 {
            return Err(InvalidParameter::new(
                "replicates",
                "at least one replicate is required",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(InvalidParameter::new(
                "alpha",
                format!("must lie strictly between 0 and 1, got {}", self.alpha),
            ));
        }
        validate_sigma(self.sigma)?;
        Ok(())
    }

    /// Degrees of freedom of the paired t-tests (`N - 1`).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn paired_df(&self) -> f64 {
        (self.subjects - 1) as f64
    }
}

pub(crate) fn validate_subjects(subjects: usize) -> Result<(), InvalidParameter> {
    // Two subjects leave the correlation test without degrees of freedom; it is
    // then flagged as degenerate on every replicate.
    if subjects <= 1 {
        return Err(InvalidParameter::new(
            "subjects",
            format!("at least 2 subjects are required, got {subjects}"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_sigma(sigma: f64) -> Result<(), InvalidParameter> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(InvalidParameter::new(
            "sigma",
            format!("must be finite and positive, got {sigma}"),
        ));
    }
    Ok(())
}
