//! Dispersion: variance, standard deviation, CV, standard error

use crate::central::mean;
use crate::helpers::sum_squared_deviations;

/// Sample variance with Bessel's correction (divisor n-1). n < 2 yields 0.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    sum_squared_deviations(values, mean(values)) / (n - 1) as f64
}

/// Sample standard deviation
pub fn standard_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// `std / |mean| * 100`, or 0 when the mean is 0
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    cv_from(mean(values), standard_deviation(values))
}

pub(crate) fn cv_from(m: f64, sd: f64) -> f64 {
    if m == 0.0 {
        0.0
    } else {
        sd / m.abs() * 100.0
    }
}

/// Standard error of the mean, `std / sqrt(n)`
pub fn standard_error(values: &[f64]) -> f64 {
    se_from(standard_deviation(values), values.len())
}

pub(crate) fn se_from(sd: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sd / (n as f64).sqrt()
    }
}
