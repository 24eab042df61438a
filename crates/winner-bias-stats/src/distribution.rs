//! Student's t distribution.
//!
//! The cumulative distribution function is evaluated through the regularized
//! incomplete beta function,
//!
//! ```text
//! P(|T| > t) = I_x(df / 2, 1 / 2),   x = df / (df + t²)
//! ```
//!
//! with `I_x` computed by Lentz's continued fraction and `ln Γ` by the Lanczos
//! approximation. Both are accurate to roughly 1e-14 relative error for the
//! degrees of freedom met in practice, well within the six significant digits
//! expected of p-values.
//!
//! Quantiles have no closed form and are found by bisection on the CDF.
//!
//! # Examples
//!
//! ```
//! use winner_bias_stats::distribution::StudentsT;
//!
//! let t = StudentsT::new(62.0).unwrap();
//! let critical = t.inverse_cdf(0.975);
//! assert!((critical - 1.998_971_517).abs() < 1e-8);
//! assert!((t.two_sided_p_value(critical) - 0.05).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("degrees of freedom must be finite and positive, got {df}")]
pub struct InvalidDegreesOfFreedom {
    pub df: f64,
}

/// Student's t distribution with `df` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentsT {
    df: f64,
}

impl StudentsT {
    pub fn new(df: f64) -> Result<Self, InvalidDegreesOfFreedom> {
        if df.is_finite() && df > 0.0 {
            Ok(Self { df })
        } else {
            Err(InvalidDegreesOfFreedom { df })
        }
    }

    /// Probability that `|T|` exceeds `|t|`.
    ///
    /// Returns `1.0` for `t == 0` and `0.0` for infinite `t`. NaN propagates.
    #[must_use]
    pub fn two_sided_p_value(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        if t.is_infinite() {
            return 0.0;
        }
        let t2 = t * t;
        let x = self.df / (self.df + t2);
        let y = t2 / (self.df + t2);
        regularized_incomplete_beta(self.df / 2.0, 0.5, x, y)
    }

    /// Cumulative distribution function `P(T <= t)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use winner_bias_stats::distribution::StudentsT;
    ///
    /// // With one degree of freedom the t distribution is standard Cauchy
    /// let cauchy = StudentsT::new(1.0).unwrap();
    /// let expected = 0.5 + 1.0_f64.atan() / std::f64::consts::PI;
    /// assert!((cauchy.cdf(1.0) - expected).abs() < 1e-13);
    /// assert_eq!(cauchy.cdf(0.0), 0.5);
    /// ```
    #[must_use]
    pub fn cdf(&self, t: f64) -> f64 {
        let tail = 0.5 * self.two_sided_p_value(t);
        if t > 0.0 { 1.0 - tail } else { tail }
    }

    /// Quantile function: the `t` with `P(T <= t) = p`.
    ///
    /// Returns `-inf` for `p <= 0`, `+inf` for `p >= 1` and NaN for NaN.
    #[must_use]
    pub fn inverse_cdf(&self, p: f64) -> f64 {
        if p.is_nan() {
            return f64::NAN;
        }
        if p <= 0.0 {
            return f64::NEG_INFINITY;
        }
        if p >= 1.0 {
            return f64::INFINITY;
        }
        if p < 0.5 {
            return -self.upper_quantile(1.0 - p);
        }
        self.upper_quantile(p)
    }

    /// Two-sided critical value `t_{1 - alpha/2}`.
    ///
    /// A statistic rejects at level `alpha` exactly when its absolute value
    /// exceeds this value.
    #[must_use]
    pub fn two_sided_critical_value(&self, alpha: f64) -> f64 {
        self.inverse_cdf(1.0 - alpha / 2.0)
    }

    fn upper_quantile(&self, p: f64) -> f64 {
        debug_assert!((0.5..1.0).contains(&p));
        if p == 0.5 {
            return 0.0;
        }
        // Bracket the root, then bisect until the interval stops shrinking.
        let mut lo = 0.0;
        let mut hi = 1.0;
        while self.cdf(hi) < p {
            lo = hi;
            hi *= 2.0;
            if hi.is_infinite() {
                return f64::INFINITY;
            }
        }
        for _ in 0..200 {
            let mid = f64::midpoint(lo, hi);
            if mid <= lo || mid >= hi {
                break;
            }
            if self.cdf(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        f64::midpoint(lo, hi)
    }
}

/// Natural logarithm of the gamma function for `x > 0` (Lanczos, g = 7).
#[expect(clippy::excessive_precision, clippy::cast_precision_loss)]
#[must_use]
pub fn ln_gamma(x: f64) -> f64 {
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + 7.5;
    let mut acc = COEFFICIENTS[0];
    for (i, &coef) in COEFFICIENTS.iter().enumerate().skip(1) {
        acc += coef / (x + i as f64);
    }
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Regularized incomplete beta function `I_x(a, b)`.
///
/// `y` must equal `1 - x`; passing it separately keeps full precision when
/// `x` is close to one.
#[must_use]
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64, y: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if y <= 0.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * y.ln();
    let front = ln_front.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        (front * beta_continued_fraction(a, b, x) / a).clamp(0.0, 1.0)
    } else {
        (1.0 - front * beta_continued_fraction(b, a, y) / b).clamp(0.0, 1.0)
    }
}

#[expect(clippy::cast_precision_loss)]
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERS: usize = 300;
    const EPS: f64 = 1e-15;
    const FPMIN: f64 = 1e-300;

    let clamp_tiny = |v: f64| if v.abs() < FPMIN { FPMIN } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / clamp_tiny(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITERS {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / clamp_tiny(1.0 + aa * d);
        c = clamp_tiny(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / clamp_tiny(1.0 + aa * d);
        c = clamp_tiny(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    h
}
