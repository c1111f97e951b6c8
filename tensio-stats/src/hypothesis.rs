//! Two-sample hypothesis testing and effect sizes

use crate::central::mean;
use crate::dispersion::variance;
use crate::distributions::t_two_tailed_p;
use serde::{Deserialize, Serialize};

pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: f64,
    pub significant: bool,
}

impl TTestResult {
    /// Result for samples that cannot be tested
    pub fn not_testable() -> Self {
        Self {
            t_statistic: 0.0,
            p_value: 1.0,
            degrees_of_freedom: 0.0,
            significant: false,
        }
    }
}

/// Welch's two-sample t-test (unequal variances).
///
/// `t = (mean_a - mean_b) / sqrt(var_a/n_a + var_b/n_b)` with
/// Welch–Satterthwaite degrees of freedom.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> TTestResult {
    let (n1, n2) = (a.len(), b.len());
    if n1 < 2 || n2 < 2 {
        return TTestResult::not_testable();
    }

    let q1 = variance(a) / n1 as f64;
    let q2 = variance(b) / n2 as f64;
    let se = (q1 + q2).sqrt();
    if se == 0.0 {
        return TTestResult::not_testable();
    }

    let t_statistic = (mean(a) - mean(b)) / se;

    // Welch-Satterthwaite
    let denom = q1 * q1 / (n1 - 1) as f64 + q2 * q2 / (n2 - 1) as f64;
    let degrees_of_freedom = if denom == 0.0 {
        (n1 + n2 - 2) as f64
    } else {
        (q1 + q2).powi(2) / denom
    };

    let p_value = t_two_tailed_p(t_statistic, degrees_of_freedom);

    TTestResult {
        t_statistic,
        p_value,
        degrees_of_freedom,
        significant: p_value < SIGNIFICANCE_LEVEL,
    }
}

/// Cohen's d: `(mean_a - mean_b) / pooled_sd`, pooled with `(n-1)` weights.
pub fn cohens_d(a: &[f64], b: &[f64]) -> f64 {
    let (n1, n2) = (a.len(), b.len());
    if n1 < 2 || n2 < 2 {
        return 0.0;
    }
    let pooled_var = ((n1 - 1) as f64 * variance(a) + (n2 - 1) as f64 * variance(b))
        / (n1 + n2 - 2) as f64;
    let pooled_sd = pooled_var.sqrt();
    if pooled_sd == 0.0 {
        return 0.0;
    }
    (mean(a) - mean(b)) / pooled_sd
}

/// Conventional magnitude bands for Cohen's d
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSize {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectSize::Negligible => "negligible",
            EffectSize::Small => "small",
            EffectSize::Medium => "medium",
            EffectSize::Large => "large",
        }
    }
}

pub fn interpret_effect_size(d: f64) -> EffectSize {
    let d = d.abs();
    if d < 0.2 {
        EffectSize::Negligible
    } else if d < 0.5 {
        EffectSize::Small
    } else if d < 0.8 {
        EffectSize::Medium
    } else {
        EffectSize::Large
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::approx_eq;

    #[test]
    fn test_welch_clear_difference() {
        let a = [140.0, 142.0, 138.0, 141.0, 139.0, 143.0];
        let b = [120.0, 122.0, 119.0, 121.0, 118.0, 123.0];
        let r = welch_t_test(&a, &b);
        assert!(r.t_statistic > 0.0);
        assert!(r.significant);
        assert!(r.p_value < 0.001);
    }

    #[test]
    fn test_welch_swap_keeps_p() {
        let a = [130.0, 128.0, 135.0, 131.0];
        let b = [127.0, 133.0, 126.0, 129.0, 131.0];
        let ab = welch_t_test(&a, &b);
        let ba = welch_t_test(&b, &a);
        assert!(approx_eq(ab.t_statistic, -ba.t_statistic, 1e-12));
        assert_eq!(ab.p_value, ba.p_value);
        assert!(approx_eq(ab.degrees_of_freedom, ba.degrees_of_freedom, 1e-12));
    }

    #[test]
    fn test_welch_degenerate() {
        assert_eq!(welch_t_test(&[1.0], &[1.0, 2.0]), TTestResult::not_testable());
        assert_eq!(welch_t_test(&[5.0, 5.0], &[5.0, 5.0]), TTestResult::not_testable());
    }

    #[test]
    fn test_welch_df_equal_variance_equal_n() {
        // Equal variances and sizes reduce Welch df to n1 + n2 - 2
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 3.0, 4.0, 5.0];
        let r = welch_t_test(&a, &b);
        assert!(approx_eq(r.degrees_of_freedom, 6.0, 1e-9));
    }

    #[test]
    fn test_cohens_d() {
        let a = [2.0, 4.0, 6.0];
        let b = [1.0, 3.0, 5.0];
        // pooled sd = 2, mean diff = 1
        assert!(approx_eq(cohens_d(&a, &b), 0.5, 1e-12));
        assert!(approx_eq(cohens_d(&b, &a), -0.5, 1e-12));
        assert_eq!(cohens_d(&[1.0], &[2.0, 3.0]), 0.0);
        assert_eq!(cohens_d(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_interpret_effect_size() {
        assert_eq!(interpret_effect_size(0.1), EffectSize::Negligible);
        assert_eq!(interpret_effect_size(-0.3), EffectSize::Small);
        assert_eq!(interpret_effect_size(0.5), EffectSize::Medium);
        assert_eq!(interpret_effect_size(-0.8), EffectSize::Large);
    }
}
