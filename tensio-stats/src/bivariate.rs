//! Bivariate statistics: covariance, Pearson correlation

use crate::central::mean;

/// Sample covariance (divisor n-1). Length mismatch or n < 2 yields 0.
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }
    let mx = mean(x);
    let my = mean(y);
    let s: f64 = x.iter().zip(y).map(|(xi, yi)| (xi - mx) * (yi - my)).sum();
    s / (n - 1) as f64
}

/// Pearson product-moment correlation coefficient.
///
/// Returns 0 for mismatched lengths, fewer than two pairs, or a series
/// with zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}
