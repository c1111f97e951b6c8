//! Shape: skewness, kurtosis

use crate::central::mean;
use crate::dispersion::standard_deviation;

/// Fisher-adjusted sample skewness. Requires n >= 3 and non-zero spread, else 0.
pub fn skewness(values: &[f64]) -> f64 {
    skewness_from(values, mean(values), standard_deviation(values))
}

pub(crate) fn skewness_from(values: &[f64], m: f64, sd: f64) -> f64 {
    let n = values.len();
    if n < 3 || sd == 0.0 {
        return 0.0;
    }
    let nf = n as f64;
    let cubed: f64 = values.iter().map(|x| ((x - m) / sd).powi(3)).sum();
    nf / ((nf - 1.0) * (nf - 2.0)) * cubed
}

/// Fisher-adjusted sample excess kurtosis. Requires n >= 4 and non-zero spread, else 0.
pub fn kurtosis(values: &[f64]) -> f64 {
    kurtosis_from(values, mean(values), standard_deviation(values))
}

pub(crate) fn kurtosis_from(values: &[f64], m: f64, sd: f64) -> f64 {
    let n = values.len();
    if n < 4 || sd == 0.0 {
        return 0.0;
    }
    let nf = n as f64;
    let fourth: f64 = values.iter().map(|x| ((x - m) / sd).powi(4)).sum();
    nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * fourth
        - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::approx_eq;

    #[test]
    fn test_skewness_symmetric() {
        assert!(approx_eq(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0, 1e-12));
    }

    #[test]
    fn test_skewness_right_tail() {
        assert!(skewness(&[1.0, 1.0, 1.0, 2.0, 10.0]) > 0.0);
    }

    #[test]
    fn test_skewness_minimums() {
        assert_eq!(skewness(&[1.0, 5.0]), 0.0);
        assert_eq!(skewness(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_kurtosis_uniform_is_platykurtic() {
        // Excess kurtosis of 1..5 with the adjusted estimator is -1.2
        assert!(approx_eq(kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]), -1.2, 1e-9));
    }

    #[test]
    fn test_kurtosis_minimums() {
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(kurtosis(&[2.0, 2.0, 2.0, 2.0]), 0.0);
    }
}
