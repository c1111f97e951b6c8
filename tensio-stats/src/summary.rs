//! Descriptive statistics snapshot

use crate::central::median_sorted;
use crate::dispersion::{cv_from, se_from};
use crate::helpers::{sorted, sum, sum_squared_deviations};
use crate::position::percentile_sorted;
use crate::shape::{kurtosis_from, skewness_from};
use serde::{Deserialize, Serialize};

/// Computed snapshot of a numeric sample. All zero for an empty sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub standard_deviation: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub coefficient_of_variation: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub standard_error: f64,
}

/// Compute every descriptive measure from one sorted copy of `values`.
///
/// The caller's slice is never reordered.
pub fn describe(values: &[f64]) -> DescriptiveStatistics {
    let n = values.len();
    if n == 0 {
        return DescriptiveStatistics::default();
    }

    let s = sorted(values);
    let mean = sum(&s) / n as f64;
    let variance = if n < 2 {
        0.0
    } else {
        sum_squared_deviations(&s, mean) / (n - 1) as f64
    };
    let sd = variance.sqrt();
    let min = s[0];
    let max = s[n - 1];
    let q1 = percentile_sorted(&s, 25.0);
    let q3 = percentile_sorted(&s, 75.0);

    DescriptiveStatistics {
        n,
        mean,
        median: median_sorted(&s),
        standard_deviation: sd,
        variance,
        min,
        max,
        range: max - min,
        q1,
        q3,
        iqr: q3 - q1,
        coefficient_of_variation: cv_from(mean, sd),
        skewness: skewness_from(&s, mean, sd),
        kurtosis: kurtosis_from(&s, mean, sd),
        standard_error: se_from(sd, n),
    }
}
