//! Position: percentile, quartiles, IQR, z-scores

use crate::central::{mean, median_sorted};
use crate::dispersion::standard_deviation;
use crate::helpers::sorted;

/// Percentile by linear interpolation on the sorted sample.
///
/// `rank = p/100 * (n-1)`, interpolated between `floor(rank)` and
/// `ceil(rank)`. `p` is clamped to `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted(values), p)
}

/// Percentile of an already sorted sample
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (n - 1) as f64;
    let floor_idx = (rank.floor() as usize).min(n - 1);
    let ceil_idx = (rank.ceil() as usize).min(n - 1);

    if floor_idx == ceil_idx {
        return sorted[floor_idx];
    }

    let lower = sorted[floor_idx];
    let upper = sorted[ceil_idx];
    lower + (upper - lower) * (rank - floor_idx as f64)
}

/// Quartiles `(q1, median, q3)`
pub fn quartiles(values: &[f64]) -> (f64, f64, f64) {
    let s = sorted(values);
    (percentile_sorted(&s, 25.0), median_sorted(&s), percentile_sorted(&s, 75.0))
}

/// Interquartile range `q3 - q1`
pub fn interquartile_range(values: &[f64]) -> f64 {
    let (q1, _, q3) = quartiles(values);
    q3 - q1
}

/// Standard scores `(x - mean) / std`. Zero spread yields all zeros.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    let sd = standard_deviation(values);
    if sd == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|x| (x - m) / sd).collect()
}
