//! Student's t distribution

use super::special::{gamma_ln, regularized_incomplete_beta};

/// Probability density of Student's t with `df` degrees of freedom
pub fn t_pdf(x: f64, df: f64) -> f64 {
    // PDF(x) = Γ((ν+1)/2) / (√(νπ) Γ(ν/2)) * (1 + x²/ν)^(-(ν+1)/2)
    let nu = df;
    let coef = gamma_ln((nu + 1.0) / 2.0) - gamma_ln(nu / 2.0) - 0.5 * (nu * std::f64::consts::PI).ln();
    let term = -(nu + 1.0) / 2.0 * (1.0 + x * x / nu).ln();
    (coef + term).exp()
}

/// Cumulative distribution P(T <= x)
pub fn t_cdf(x: f64, df: f64) -> f64 {
    let tail = 0.5 * regularized_incomplete_beta(df / 2.0, 0.5, df / (df + x * x));
    if x >= 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Two-tailed p-value P(|T| >= |t|).
///
/// Computed directly from the incomplete beta function rather than as
/// `2 * (1 - cdf)` so small tails keep their precision. The result lies in
/// `(0, 1]` for finite `t`, and `df <= 0` yields 1.
pub fn t_two_tailed_p(t: f64, df: f64) -> f64 {
    if df <= 0.0 {
        return 1.0;
    }
    let p = regularized_incomplete_beta(df / 2.0, 0.5, df / (df + t * t));
    p.clamp(f64::MIN_POSITIVE, 1.0)
}

/// Critical value `t(1 - α/2, df)` for a two-sided interval at `confidence_level`.
///
/// Solved by bracketed bisection on the two-tailed p-value, which is
/// monotone in `|t|`, so the critical value grows with the confidence level
/// and shrinks as `df` grows.
pub fn t_critical(confidence_level: f64, df: f64) -> f64 {
    if confidence_level <= 0.0 {
        return 0.0;
    }
    if confidence_level >= 1.0 {
        return f64::INFINITY;
    }
    let df = df.max(1.0);
    let alpha = 1.0 - confidence_level;

    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut expansions = 0;
    while t_two_tailed_p(hi, df) > alpha && expansions < 64 {
        lo = hi;
        hi *= 2.0;
        expansions += 1;
    }

    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if t_two_tailed_p(mid, df) > alpha {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-12 * hi.max(1.0) {
            break;
        }
    }

    0.5 * (lo + hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_t_cdf_zero() {
        assert!((t_cdf(0.0, 10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_t_cdf_symmetry() {
        let upper = t_cdf(1.7, 8.0);
        let lower = t_cdf(-1.7, 8.0);
        assert!((upper + lower - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_t_pdf_peak() {
        // Standard value: t_pdf(0, 10) ≈ 0.3891
        assert!((t_pdf(0.0, 10.0) - 0.38911).abs() < 1e-4);
    }

    #[test]
    fn test_two_tailed_p_known_values() {
        // t = 2.228 at df = 10 is the 95% two-sided critical value
        assert!((t_two_tailed_p(2.228, 10.0) - 0.05).abs() < 1e-3);
        assert_eq!(t_two_tailed_p(0.0, 10.0), 1.0);
    }

    #[test]
    fn test_two_tailed_p_huge_t_stays_positive() {
        let p = t_two_tailed_p(1e6, 3.0);
        assert!(p > 0.0 && p < 1e-12);
    }

    #[test]
    fn test_t_critical_known_values() {
        assert!((t_critical(0.95, 10.0) - 2.228).abs() < 1e-3);
        assert!((t_critical(0.95, 1.0) - 12.706).abs() < 1e-2);
        assert!((t_critical(0.99, 30.0) - 2.750).abs() < 1e-3);
        // Approaches the normal quantile for large df
        assert!((t_critical(0.95, 10_000.0) - 1.960).abs() < 1e-2);
    }

    #[test]
    fn test_t_critical_monotone() {
        assert!(t_critical(0.99, 10.0) > t_critical(0.95, 10.0));
        assert!(t_critical(0.95, 10.0) > t_critical(0.90, 10.0));
        assert!(t_critical(0.95, 3.0) > t_critical(0.95, 10.0));
        assert!(t_critical(0.95, 10.0) > t_critical(0.95, 100.0));
    }

    proptest! {
        #[test]
        fn prop_p_value_decreases_with_abs_t(a in 0.0f64..20.0, b in 0.0f64..20.0, df in 1.0f64..200.0) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            let p_small = t_two_tailed_p(small, df);
            let p_large = t_two_tailed_p(large, df);
            prop_assert!(p_small + 1e-12 >= p_large);
            prop_assert!(p_large > 0.0 && p_small <= 1.0);
        }

        #[test]
        fn prop_p_value_symmetric_in_sign(t in -20.0f64..20.0, df in 1.0f64..200.0) {
            prop_assert_eq!(t_two_tailed_p(t, df), t_two_tailed_p(-t, df));
        }
    }
}
