//! Outlier detection using Tukey's IQR fences

use crate::helpers::sorted;
use crate::position::percentile_sorted;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Outlying values in input order
    pub outliers: Vec<f64>,
    /// Positions of the outliers in the input
    pub indices: Vec<usize>,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl OutlierReport {
    fn unbounded() -> Self {
        Self {
            outliers: Vec::new(),
            indices: Vec::new(),
            lower_bound: f64::NEG_INFINITY,
            upper_bound: f64::INFINITY,
        }
    }
}

/// Flag values outside `[Q1 - k·IQR, Q3 + k·IQR]`.
///
/// With fewer than 4 values no fences are computed: bounds are infinite
/// and nothing is flagged.
pub fn detect_outliers(values: &[f64], k: f64) -> OutlierReport {
    if values.len() < 4 {
        return OutlierReport::unbounded();
    }

    let s = sorted(values);
    let q1 = percentile_sorted(&s, 25.0);
    let q3 = percentile_sorted(&s, 75.0);
    let iqr = q3 - q1;
    let lower_bound = q1 - k * iqr;
    let upper_bound = q3 + k * iqr;

    let (indices, outliers) = values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v < lower_bound || **v > upper_bound)
        .map(|(i, v)| (i, *v))
        .unzip();

    OutlierReport { outliers, indices, lower_bound, upper_bound }
}
