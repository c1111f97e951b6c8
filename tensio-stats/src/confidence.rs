//! Confidence intervals for a sample mean

use crate::central::mean;
use crate::dispersion::standard_error;
use crate::distributions::t_critical;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    pub margin_of_error: f64,
}

impl ConfidenceInterval {
    /// Symmetric interval `estimate ± margin`
    pub fn around(estimate: f64, margin_of_error: f64, confidence_level: f64) -> Self {
        let margin_of_error = margin_of_error.abs();
        Self {
            estimate,
            lower: estimate - margin_of_error,
            upper: estimate + margin_of_error,
            confidence_level,
            margin_of_error,
        }
    }

    /// Degenerate interval collapsed onto one value
    pub fn point(estimate: f64, confidence_level: f64) -> Self {
        Self::around(estimate, 0.0, confidence_level)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// `mean ± t(1-α/2, n-1) · SE`. Fewer than two values collapse to a point.
pub fn confidence_interval(values: &[f64], confidence_level: f64) -> ConfidenceInterval {
    let n = values.len();
    match n {
        0 => ConfidenceInterval::point(0.0, confidence_level),
        1 => ConfidenceInterval::point(values[0], confidence_level),
        _ => {
            let t = t_critical(confidence_level, (n - 1) as f64);
            ConfidenceInterval::around(mean(values), t * standard_error(values), confidence_level)
        }
    }
}
