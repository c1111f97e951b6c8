//! Central tendency: mean, median

use crate::helpers::{sorted, sum};

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Median of an arbitrary sample. Empty input yields 0.
pub fn median(values: &[f64]) -> f64 {
    median_sorted(&sorted(values))
}

/// Median of an already sorted sample
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(mean(&[7.5]), 7.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_mean_replicated() {
        let v = [118.0, 125.0, 131.0, 122.0];
        let replicated: Vec<f64> = v.iter().chain(v.iter()).chain(v.iter()).copied().collect();
        assert!((mean(&replicated) - mean(&v)).abs() < 1e-12);
    }
}
