//! Helper functions for statistical operations

/// Sum of values
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Sorted copy (ascending). Uses total ordering so NaN cannot panic the sort.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Σ(x - m)²
pub fn sum_squared_deviations(values: &[f64], m: f64) -> f64 {
    values.iter().map(|x| (x - m) * (x - m)).sum()
}

/// Approximate equality used by the tests across the crate
#[cfg(test)]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
