use crate::{descriptive::DescriptiveStats, histogram::Histogram, percentiles::Percentiles};

/// Comprehensive statistical analysis combining multiple measures.
///
/// This structure provides a complete statistical overview of a dataset by combining:
/// - Basic descriptive statistics (mean, median, variance, standard deviation, etc.)
/// - Percentile values for quantile analysis
/// - Histogram for distribution visualization
///
/// # Examples
///
/// ```
/// use winner_bias_stats::comprehensive::ComprehensiveStats;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let stats = ComprehensiveStats::from_sorted(
///     &values,
///     &[25.0, 50.0, 75.0],  // Percentiles to compute
///     5,                     // Number of histogram bins
///     None,                  // Auto-detect min
///     None,                  // Auto-detect max
/// ).unwrap();
///
/// assert_eq!(stats.stats.mean, 5.5);
/// assert_eq!(stats.percentiles.get(50.0), Some(6.0));
/// assert_eq!(stats.histogram.total_count(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensiveStats {
    /// Basic descriptive statistics for the dataset.
    pub stats: DescriptiveStats,
    /// Precomputed percentile values for quick lookup.
    pub percentiles: Percentiles,
    /// Histogram showing the distribution of values across bins.
    pub histogram: Histogram,
}

impl ComprehensiveStats {
    /// Computes comprehensive statistics from pre-sorted finite values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - The data points to analyze, in ascending order
    /// * `percentile_points` - The percentile points to compute (e.g., [25.0, 50.0, 75.0])
    /// * `hist_num_bins` - The number of main histogram bins (excluding underflow/overflow)
    /// * `hist_min` - Optional explicit lower bound of the main histogram range
    /// * `hist_max` - Optional explicit upper bound of the main histogram range
    ///
    /// Returns `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        percentile_points: &[f64],
        hist_num_bins: usize,
        hist_min: Option<f64>,
        hist_max: Option<f64>,
    ) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, percentile_points);
        let histogram = Histogram::from_sorted(sorted_values, hist_num_bins, hist_min, hist_max);

        Some(Self {
            stats,
            percentiles,
            histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(ComprehensiveStats::from_sorted(&[], &[50.0], 5, None, None).is_none());
    }

    #[test]
    fn test_parts_agree() {
        let values = (1..=200).map(f64::from).collect::<Vec<_>>();
        let stats = ComprehensiveStats::from_sorted(&values, &[5.0, 95.0], 10, None, None).unwrap();
        assert_eq!(stats.stats.count, 200);
        assert_eq!(stats.histogram.total_count(), 200);
        assert!(stats.percentiles.get(5.0).unwrap() >= stats.stats.min);
        assert!(stats.percentiles.get(95.0).unwrap() <= stats.stats.max);
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_unsorted_values_panic() {
        let _ = ComprehensiveStats::from_sorted(&[2.0, 1.0], &[50.0], 5, None, None);
    }
}
