use std::ops::Range;

use crate::percentiles;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into equal-width bins and counts the
/// values falling into each bin. Unless explicit bounds are given, the main
/// range covers P5–P95 so a few extreme values do not flatten the shape; values
/// outside the main range are collected in dedicated underflow and overflow bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order. May include an
    /// underflow bin first and an overflow bin last.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from pre-sorted finite values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - The data points, sorted in ascending order.
    /// * `num_bins` - The number of main bins (excluding underflow/overflow bins).
    /// * `explicit_min` - If provided, overrides the lower bound of the main range.
    /// * `explicit_max` - If provided, overrides the upper bound of the main range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winner_bias_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    /// let histogram = Histogram::from_sorted(&values, 4, Some(0.0), Some(12.0));
    /// assert_eq!(histogram.bins.len(), 4);
    /// assert_eq!(histogram.total_count(), 10);
    /// assert_eq!(histogram.bins[0].range, 0.0..3.0);
    /// assert_eq!(histogram.bins[0].count, 2);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        if sorted_values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let hard_min = sorted_values[0];
        let hard_max = sorted_values[sorted_values.len() - 1];

        let mut soft_min =
            explicit_min.unwrap_or_else(|| percentiles::compute_percentile(sorted_values, 5.0));
        let mut soft_max =
            explicit_max.unwrap_or_else(|| percentiles::compute_percentile(sorted_values, 95.0));
        if soft_max - soft_min < f64::EPSILON {
            // Distribution concentrated at a single value
            soft_min -= 0.5;
            soft_max += 0.5;
        }
        let bin_width = (soft_max - soft_min) / num_bins as f64;

        let has_underflow = hard_min < soft_min;
        let has_overflow = hard_max > soft_max;

        let mut bins = vec![];
        if has_underflow {
            bins.push(HistogramBin {
                range: hard_min..soft_min,
                count: 0,
            });
        }
        for bin_idx in 0..num_bins {
            // Recompute boundaries from the origin to avoid accumulation errors
            let start = soft_min + bin_idx as f64 * bin_width;
            let end = if bin_idx == num_bins - 1 {
                // Last main bin is closed so that soft_max itself is counted
                soft_max.next_up()
            } else {
                soft_min + (bin_idx + 1) as f64 * bin_width
            };
            bins.push(HistogramBin {
                range: start..end,
                count: 0,
            });
        }
        if has_overflow {
            bins.push(HistogramBin {
                range: soft_max.next_up()..hard_max.next_up(),
                count: 0,
            });
        }

        let offset = usize::from(has_underflow);
        for &val in sorted_values {
            let idx = if val < soft_min {
                0
            } else if val > soft_max {
                offset + num_bins
            } else {
                let position = ((val - soft_min) / bin_width).floor() as usize;
                offset + position.min(num_bins - 1)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Returns the index of the bin whose range contains `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winner_bias_stats::histogram::Histogram;
    /// let histogram = Histogram::from_sorted(&[0.5, 1.5, 2.5], 3, Some(0.0), Some(3.0));
    /// assert_eq!(histogram.bin_index(1.0), Some(1));
    /// assert_eq!(histogram.bin_index(3.0), Some(2));
    /// assert_eq!(histogram.bin_index(-1.0), None);
    /// ```
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        self.bins.iter().position(|bin| bin.range.contains(&value))
    }

    /// Returns the number of values counted across all bins.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Returns the largest bin count, or `0` for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}
