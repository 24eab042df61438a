//! Statistical building blocks for the winner-bias simulator.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: mean, median, sample variance, standard deviation
//! - **Percentiles**: nearest-rank percentile computation and storage
//! - **Histogram generation**: equal-width bins with underflow/overflow tails
//! - **Comprehensive statistics**: descriptive statistics, percentiles and a histogram in one
//! - **Student's t distribution**: CDF, two-sided p-values, quantiles and critical values
//! - **Inference**: paired t-test and Pearson correlation test
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`comprehensive`]: Comprehensive statistical analysis combining multiple measures
//! - [`distribution`]: Student's t distribution and the special functions behind it
//! - [`inference`]: Two-sided significance tests on paired samples
//!
//! # Examples
//!
//! ## Running a paired t-test
//!
//! ```
//! use winner_bias_stats::inference::paired_t_test;
//!
//! let treated = [2.1, 2.5, 1.9, 2.8, 2.2, 2.6];
//! let control = [1.8, 2.0, 2.0, 2.1, 1.7, 2.2];
//! let outcome = paired_t_test(&treated, &control).unwrap();
//! assert!(outcome.rejects(0.05));
//! ```
//!
//! ## Critical values
//!
//! ```
//! use winner_bias_stats::distribution::StudentsT;
//!
//! let t = StudentsT::new(10.0).unwrap();
//! let critical = t.two_sided_critical_value(0.05);
//! assert!((critical - 2.228_138_852).abs() < 1e-8);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use winner_bias_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::from_sorted(&values, 5, None, None);
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod comprehensive;
pub mod descriptive;
pub mod distribution;
pub mod histogram;
pub mod inference;
pub mod percentiles;
