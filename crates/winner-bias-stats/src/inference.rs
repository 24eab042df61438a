//! Two-sided significance tests on paired samples.
//!
//! - [`paired_t_test`]: Student's t-test on the per-pair differences `x_i - y_i`
//! - [`pearson_correlation_test`]: test of zero Pearson correlation between `x` and `y`
//!
//! Both tests refuse to produce a statistic when the data carry no variance:
//! the t statistic would be `0 / 0` (or the correlation undefined), and a NaN
//! would otherwise leak into whatever aggregates the results. Such samples are
//! reported as [`InferenceError::DegenerateSample`].
//!
//! # Examples
//!
//! ```
//! use winner_bias_stats::inference::{paired_t_test, pearson_correlation_test};
//!
//! let before = [5.1, 4.8, 6.0, 5.5, 5.9];
//! let after = [4.9, 4.1, 5.2, 5.6, 5.0];
//! let outcome = paired_t_test(&before, &after).unwrap();
//! assert_eq!(outcome.df, 4.0);
//! assert!(outcome.statistic > 0.0);
//!
//! let correlation = pearson_correlation_test(&before, &after).unwrap();
//! assert!(correlation.r > 0.0);
//! ```

use crate::{descriptive, distribution::StudentsT};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InferenceError {
    #[display("samples have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[display("at least {required} observations are required, got {count}")]
    TooFewObservations { count: usize, required: usize },
    #[display("sample has zero variance; test statistic is undefined")]
    DegenerateSample,
}

/// Result of a two-sided t-based test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// Signed test statistic.
    pub statistic: f64,
    /// Degrees of freedom of the reference t distribution.
    pub df: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

impl TestOutcome {
    fn from_statistic(statistic: f64, df: f64) -> Self {
        // df is always >= 1 here
        let p_value = StudentsT::new(df).map_or(f64::NAN, |t| t.two_sided_p_value(statistic));
        Self {
            statistic,
            df,
            p_value,
        }
    }

    /// Whether the null hypothesis is rejected at significance level `alpha`
    /// (`p < alpha`).
    #[must_use]
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Result of [`pearson_correlation_test`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationOutcome {
    /// Pearson product-moment correlation coefficient.
    pub r: f64,
    /// t-test of `r == 0` with `n - 2` degrees of freedom.
    pub test: TestOutcome,
}

/// Two-sided one-sample t-test of `mean(values) == 0`.
///
/// `t = mean / (sd / sqrt(n))` with `n - 1` degrees of freedom, where `sd`
/// uses the `n - 1` denominator.
#[expect(clippy::cast_precision_loss)]
pub fn one_sample_t_test(values: &[f64]) -> Result<TestOutcome, InferenceError> {
    let n = values.len();
    if n < 2 {
        return Err(InferenceError::TooFewObservations {
            count: n,
            required: 2,
        });
    }
    let (mean, variance) =
        descriptive::mean_and_variance(values).ok_or(InferenceError::DegenerateSample)?;
    // Identical values can still leave a rounding-sized variance behind
    if is_constant(values) || variance <= 0.0 || !variance.is_finite() {
        return Err(InferenceError::DegenerateSample);
    }
    let n = n as f64;
    let statistic = mean / (variance.sqrt() / n.sqrt());
    Ok(TestOutcome::from_statistic(statistic, n - 1.0))
}

/// Two-sided paired t-test of `mean(x - y) == 0`.
///
/// # Examples
///
/// ```
/// use winner_bias_stats::inference::{InferenceError, paired_t_test};
///
/// // Differences 1, 2, 6: mean 3, sd sqrt(7)
/// let outcome = paired_t_test(&[1.0, 2.0, 6.0], &[0.0, 0.0, 0.0]).unwrap();
/// let expected = 3.0 / (7.0_f64.sqrt() / 3.0_f64.sqrt());
/// assert!((outcome.statistic - expected).abs() < 1e-12);
/// assert_eq!(outcome.df, 2.0);
///
/// // Constant differences have no variance
/// assert_eq!(
///     paired_t_test(&[1.0, 2.0], &[0.0, 1.0]),
///     Err(InferenceError::DegenerateSample),
/// );
/// ```
pub fn paired_t_test(x: &[f64], y: &[f64]) -> Result<TestOutcome, InferenceError> {
    check_lengths(x, y)?;
    let differences = x.iter().zip(y).map(|(a, b)| a - b).collect::<Vec<_>>();
    one_sample_t_test(&differences)
}

/// Two-sided test of zero Pearson correlation between `x` and `y`.
///
/// `t = r * sqrt((n - 2) / (1 - r²))` with `n - 2` degrees of freedom. A
/// perfect correlation (`|r| == 1`) yields an infinite statistic and a p-value
/// of zero. Inputs whose sums of squares overflow are reported as
/// [`InferenceError::DegenerateSample`], like the paired t-test does for a
/// non-finite variance.
#[expect(clippy::cast_precision_loss)]
pub fn pearson_correlation_test(
    x: &[f64],
    y: &[f64],
) -> Result<CorrelationOutcome, InferenceError> {
    check_lengths(x, y)?;
    let n = x.len();
    if n < 2 {
        return Err(InferenceError::TooFewObservations {
            count: n,
            required: 2,
        });
    }
    if n == 2 {
        // Two points are always perfectly correlated and leave no degrees of freedom
        return Err(InferenceError::DegenerateSample);
    }
    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if is_constant(x) || is_constant(y) || sxx <= 0.0 || syy <= 0.0 {
        return Err(InferenceError::DegenerateSample);
    }
    // Sums of squares overflow for extreme inputs
    if !(sxx.is_finite() && syy.is_finite() && sxy.is_finite()) {
        return Err(InferenceError::DegenerateSample);
    }
    let scale = match (sxx * syy).sqrt() {
        product if product.is_finite() => product,
        _ => sxx.sqrt() * syy.sqrt(),
    };
    let r = sxy / scale;
    if !r.is_finite() {
        return Err(InferenceError::DegenerateSample);
    }
    let r = r.clamp(-1.0, 1.0);
    let df = nf - 2.0;
    let statistic = if r.abs() == 1.0 {
        f64::INFINITY.copysign(r)
    } else {
        r * (df / (1.0 - r * r)).sqrt()
    };
    Ok(CorrelationOutcome {
        r,
        test: TestOutcome::from_statistic(statistic, df),
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), InferenceError> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(InferenceError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        })
    }
}
