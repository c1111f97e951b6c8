//! Before/after comparison of two samples

use crate::confidence::{ConfidenceInterval, DEFAULT_CONFIDENCE_LEVEL};
use crate::distributions::t_critical;
use crate::hypothesis::{cohens_d, interpret_effect_size, welch_t_test, EffectSize, TTestResult};
use crate::summary::{describe, DescriptiveStatistics};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparisonResult {
    pub period1: DescriptiveStatistics,
    pub period2: DescriptiveStatistics,
    /// `mean(period2) - mean(period1)`
    pub mean_difference: f64,
    /// Relative to `mean(period1)`; 0 when that mean is 0
    pub percent_change: f64,
    /// Cohen's d of period2 against period1 (same sign as `mean_difference`)
    pub effect_size: f64,
    pub effect_size_interpretation: EffectSize,
    /// 95% interval for `mean_difference`
    pub difference_ci: ConfidenceInterval,
    pub t_test: TTestResult,
}

/// Compare two periods.
///
/// Swapping the arguments negates the difference, the effect size and the
/// t statistic; the p-value is unchanged.
pub fn compare_periods(period1: &[f64], period2: &[f64]) -> PeriodComparisonResult {
    let s1 = describe(period1);
    let s2 = describe(period2);

    let mean_difference = s2.mean - s1.mean;
    let percent_change = if s1.mean == 0.0 {
        0.0
    } else {
        mean_difference / s1.mean * 100.0
    };

    let effect_size = cohens_d(period2, period1);

    let se_diff = (s1.standard_error.powi(2) + s2.standard_error.powi(2)).sqrt();
    let df = s1.n.saturating_sub(1).min(s2.n.saturating_sub(1)).max(1);
    let margin = t_critical(DEFAULT_CONFIDENCE_LEVEL, df as f64) * se_diff;

    PeriodComparisonResult {
        period1: s1,
        period2: s2,
        mean_difference,
        percent_change,
        effect_size,
        effect_size_interpretation: interpret_effect_size(effect_size),
        difference_ci: ConfidenceInterval::around(mean_difference, margin, DEFAULT_CONFIDENCE_LEVEL),
        t_test: welch_t_test(period1, period2),
    }
}
