/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and dispersion
/// for a dataset of `f64` values. Variance and standard deviation use the
/// unbiased (`n - 1`) denominator, matching the estimators used by the
/// hypothesis tests in [`inference`](crate::inference).
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The sample variance of the dataset (`0.0` for a single value).
    pub variance: f64,
    /// The sample standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Returns `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winner_bias_stats::descriptive::DescriptiveStats;
    /// let mut values = [5.0, 2.0, 4.0, 1.0];
    /// values.sort_by(f64::total_cmp);
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.count, 4);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let (mean, variance) = mean_and_variance(sorted_values)?;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
        } else {
            sorted_values[mid]
        };

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Computes the arithmetic mean and the sample variance of `values`.
///
/// Uses a two-pass algorithm: the mean first, then the sum of squared
/// deviations divided by `n - 1`. A single value has variance `0.0`.
///
/// Returns `None` if `values` is empty.
///
/// # Examples
///
/// ```
/// # use winner_bias_stats::descriptive::mean_and_variance;
/// let (mean, variance) = mean_and_variance(&[1.0, 2.0, 6.0]).unwrap();
/// assert_eq!(mean, 3.0);
/// assert_eq!(variance, 7.0);
/// assert_eq!(mean_and_variance(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_and_variance(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() == 1 {
        return Some((mean, 0.0));
    }
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some((mean, sum_sq / (n - 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::from_sorted(&[]).is_none());
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let stats = DescriptiveStats::from_sorted(&[4.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 4.5);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_even_count_median_is_midpoint() {
        let stats = DescriptiveStats::from_sorted(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_sample_variance_uses_bessel_correction() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = DescriptiveStats::from_sorted(&values).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_values() {
        let (mean, variance) = mean_and_variance(&[0.25; 10]).unwrap();
        assert_eq!(mean, 0.25);
        assert_eq!(variance, 0.0);
    }
}
