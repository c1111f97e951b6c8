//! Simple ordinary-least-squares regression with significance testing

use crate::bivariate::pearson_correlation;
use crate::central::mean;
use crate::distributions::t_two_tailed_p;
use serde::{Deserialize, Serialize};

/// Full result of `linear_regression`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    pub correlation_coefficient: f64,
    pub slope_standard_error: f64,
    pub intercept_standard_error: f64,
    pub residual_standard_error: f64,
    /// t statistic for H0: slope = 0
    pub t_statistic: f64,
    /// Two-tailed p-value of `t_statistic`
    pub p_value: f64,
    pub degrees_of_freedom: usize,
    pub predictions: Vec<f64>,
    pub residuals: Vec<f64>,
}

impl LinearRegressionResult {
    /// Result for inputs that admit no fit
    pub fn degenerate() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            adjusted_r_squared: 0.0,
            correlation_coefficient: 0.0,
            slope_standard_error: 0.0,
            intercept_standard_error: 0.0,
            residual_standard_error: 0.0,
            t_statistic: 0.0,
            p_value: 1.0,
            degrees_of_freedom: 0,
            predictions: Vec::new(),
            residuals: Vec::new(),
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y = slope * x + intercept` by OLS.
///
/// Fewer than two points, mismatched lengths or zero variance in `x` give
/// `LinearRegressionResult::degenerate()`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> LinearRegressionResult {
    let n = x.len();
    if n != y.len() || n < 2 {
        return LinearRegressionResult::degenerate();
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        sxy += dx * (yi - mean_y);
        sxx += dx * dx;
    }

    if sxx == 0.0 {
        return LinearRegressionResult::degenerate();
    }

    // slope = Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let predictions: Vec<f64> = x.iter().map(|xi| slope * xi + intercept).collect();
    let residuals: Vec<f64> = y.iter().zip(&predictions).map(|(yi, pi)| yi - pi).collect();

    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    let ss_tot: f64 = y.iter().map(|yi| (yi - mean_y) * (yi - mean_y)).sum();

    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    let adjusted_r_squared = if n > 2 {
        1.0 - (1.0 - r_squared) * (n - 1) as f64 / (n - 2) as f64
    } else {
        r_squared
    };

    let df = n.saturating_sub(2);
    let residual_standard_error = if df == 0 {
        0.0
    } else {
        (ss_res / df as f64).sqrt()
    };

    let slope_standard_error = residual_standard_error / sxx.sqrt();
    let intercept_standard_error =
        residual_standard_error * (1.0 / n as f64 + mean_x * mean_x / sxx).sqrt();

    let t_statistic = if slope_standard_error == 0.0 {
        0.0
    } else {
        slope / slope_standard_error
    };
    let p_value = if df == 0 {
        1.0
    } else {
        t_two_tailed_p(t_statistic, df as f64)
    };

    LinearRegressionResult {
        slope,
        intercept,
        r_squared,
        adjusted_r_squared,
        correlation_coefficient: pearson_correlation(x, y),
        slope_standard_error,
        intercept_standard_error,
        residual_standard_error,
        t_statistic,
        p_value,
        degrees_of_freedom: df,
        predictions,
        residuals,
    }
}
