//! Tensio Statistics
//!
//! Descriptive and inferential statistics over `f64` samples, plus the
//! before/after period comparison built on them.
//! Every function is total: empty or mismatched input yields a neutral
//! value (0, an all-zero snapshot, `p = 1`) instead of an error.

mod helpers;
mod central;
mod dispersion;
mod position;
mod shape;
mod summary;
mod bivariate;
mod regression;
pub mod distributions;
mod confidence;
mod hypothesis;
mod outliers;
mod transform;
mod comparison;
mod tools;

pub use bivariate::{covariance, pearson_correlation};
pub use central::{mean, median};
pub use comparison::{compare_periods, PeriodComparisonResult};
pub use confidence::{confidence_interval, ConfidenceInterval, DEFAULT_CONFIDENCE_LEVEL};
pub use dispersion::{coefficient_of_variation, standard_deviation, standard_error, variance};
pub use hypothesis::{
    cohens_d, interpret_effect_size, welch_t_test, EffectSize, TTestResult, SIGNIFICANCE_LEVEL,
};
pub use outliers::{detect_outliers, OutlierReport, DEFAULT_IQR_MULTIPLIER};
pub use position::{interquartile_range, percentile, quartiles, z_scores};
pub use regression::{linear_regression, LinearRegressionResult};
pub use shape::{kurtosis, skewness};
pub use summary::{describe, DescriptiveStatistics};
pub use transform::{exponential_moving_average, moving_average};

use tensio_plugin::ToolRegistry;

/// Load statistics tools into registry
pub fn load_stats_tools(registry: ToolRegistry) -> ToolRegistry {
    registry
        // Descriptive
        .with_tool(tools::Describe)
        .with_tool(tools::Percentile)
        .with_tool(tools::ZScores)

        // Inferential
        .with_tool(tools::Correlate)
        .with_tool(tools::Regress)
        .with_tool(tools::Ci)
        .with_tool(tools::TTest)
        .with_tool(tools::EffectSizeTool)
        .with_tool(tools::Outliers)

        // Smoothing
        .with_tool(tools::MovingAverage)
        .with_tool(tools::Ema)

        // Comparison
        .with_tool(tools::ComparePeriods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_stats_tools() {
        let registry = load_stats_tools(ToolRegistry::new());
        assert_eq!(registry.len(), 12);
        assert!(registry.get_tool("compare_periods").is_some());
        assert!(registry.get_tool("confidence_interval").is_some());
    }

    #[test]
    fn test_related_excludes_self() {
        let registry = load_stats_tools(ToolRegistry::new());
        for schema in registry.tool_schemas() {
            let name = schema["name"].as_str().unwrap();
            let meta = registry.get_tool(name).unwrap().meta();
            assert!(!meta.related.contains(&name), "{} lists itself", name);
        }
    }
}
