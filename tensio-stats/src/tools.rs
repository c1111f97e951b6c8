//! Tool plugins over the statistics functions

use crate::{
    compare_periods, confidence_interval, describe, detect_outliers, exponential_moving_average,
    interpret_effect_size, linear_regression, moving_average, pearson_correlation, percentile,
    welch_t_test, z_scores, cohens_d, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_IQR_MULTIPLIER,
};
use tensio_plugin::prelude::*;

// ============ Describe ============

pub struct Describe;

static DESCRIBE_ARGS: [ArgMeta; 1] = [ArgMeta::list("values", "number", "Sample data")];

static DESCRIBE_EXAMPLES: [&str; 2] = [
    "describe([120, 125, 130]) → {n: 3, mean: 125, median: 125, ...}",
    "describe([]) → all-zero snapshot",
];

static DESCRIBE_RELATED: [&str; 3] = ["percentile", "z_scores", "outliers"];

impl ToolPlugin for Describe {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "describe",
            description: "Descriptive statistics snapshot (mean, median, spread, shape)",
            usage: "describe(values)",
            args: &DESCRIBE_ARGS,
            returns: "DescriptiveStatistics",
            examples: &DESCRIBE_EXAMPLES,
            category: "stats/descriptive",
            related: &DESCRIBE_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "describe", "values")?;
        Ok(serde_json::to_value(describe(&values))?)
    }
}

// ============ Percentile ============

pub struct Percentile;

static PERCENTILE_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("values", "number", "Sample data"),
    ArgMeta::required("p", "number", "Percentile in [0, 100], clamped"),
];

static PERCENTILE_EXAMPLES: [&str; 2] = [
    "percentile([1,2,3,4,5], 50) → 3",
    "percentile([1,2,3,4], 25) → 1.75",
];

static PERCENTILE_RELATED: [&str; 1] = ["describe"];

impl ToolPlugin for Percentile {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "percentile",
            description: "Linear-interpolated percentile",
            usage: "percentile(values, p)",
            args: &PERCENTILE_ARGS,
            returns: "Number",
            examples: &PERCENTILE_EXAMPLES,
            category: "stats/descriptive",
            related: &PERCENTILE_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "percentile", "values")?;
        if args.get("p").is_none() {
            return Err(TensioError::missing_arg("percentile", "p"));
        }
        let p = args::number_or(args, "percentile", "p", 50.0)?;
        Ok(json!(percentile(&values, p)))
    }
}

// ============ Z-Scores ============

pub struct ZScores;

static Z_ARGS: [ArgMeta; 1] = [ArgMeta::list("values", "number", "Sample data")];

static Z_EXAMPLES: [&str; 1] = ["z_scores([1,2,3]) → [-1, 0, 1]"];

static Z_RELATED: [&str; 2] = ["describe", "outliers"];

impl ToolPlugin for ZScores {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "z_scores",
            description: "Standard scores; all zero when the sample has no spread",
            usage: "z_scores(values)",
            args: &Z_ARGS,
            returns: "List<Number>",
            examples: &Z_EXAMPLES,
            category: "stats/descriptive",
            related: &Z_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "z_scores", "values")?;
        Ok(json!(z_scores(&values)))
    }
}

// ============ Correlation ============

pub struct Correlate;

static XY_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("x", "number", "First variable"),
    ArgMeta::list("y", "number", "Second variable, same length as x"),
];

static CORRELATE_EXAMPLES: [&str; 2] = [
    "correlate([1,2,3], [2,4,6]) → {r: 1}",
    "correlate([1,2], [1,2,3]) → {r: 0} (length mismatch)",
];

static CORRELATE_RELATED: [&str; 1] = ["regress"];

impl ToolPlugin for Correlate {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "correlate",
            description: "Pearson correlation coefficient",
            usage: "correlate(x, y)",
            args: &XY_ARGS,
            returns: "Object",
            examples: &CORRELATE_EXAMPLES,
            category: "stats/inferential",
            related: &CORRELATE_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let x = args::numbers(args, "correlate", "x")?;
        let y = args::numbers(args, "correlate", "y")?;
        Ok(json!({ "r": pearson_correlation(&x, &y) }))
    }
}

// ============ Regression ============

pub struct Regress;

static REGRESS_EXAMPLES: [&str; 1] = ["regress([1,2,3,4], [2,4,6,8]) → {slope: 2, intercept: 0, r_squared: 1, ...}"];

static REGRESS_RELATED: [&str; 2] = ["correlate", "bp_trend"];

impl ToolPlugin for Regress {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "regress",
            description: "Ordinary least squares fit of y on x with slope significance",
            usage: "regress(x, y)",
            args: &XY_ARGS,
            returns: "LinearRegressionResult",
            examples: &REGRESS_EXAMPLES,
            category: "stats/inferential",
            related: &REGRESS_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let x = args::numbers(args, "regress", "x")?;
        let y = args::numbers(args, "regress", "y")?;
        Ok(serde_json::to_value(linear_regression(&x, &y))?)
    }
}

// ============ Confidence Interval ============

pub struct Ci;

static CI_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("values", "number", "Sample data"),
    ArgMeta::optional("level", "number", "Confidence level (0-1)", "0.95"),
];

static CI_EXAMPLES: [&str; 2] = [
    "confidence_interval([1,2,3,4,5]) → {estimate: 3, lower: 1.04, upper: 4.96, ...}",
    "confidence_interval([1,2,3,4,5], 0.99)",
];

static CI_RELATED: [&str; 2] = ["describe", "t_test"];

impl ToolPlugin for Ci {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "confidence_interval",
            description: "t-based confidence interval for the mean",
            usage: "confidence_interval(values, level?)",
            args: &CI_ARGS,
            returns: "ConfidenceInterval",
            examples: &CI_EXAMPLES,
            category: "stats/inferential",
            related: &CI_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "confidence_interval", "values")?;
        let level = args::number_or(args, "confidence_interval", "level", DEFAULT_CONFIDENCE_LEVEL)?;

        if level <= 0.0 || level >= 1.0 {
            return Err(TensioError::domain_error("confidence_interval() requires 0 < level < 1")
                .at_field("level"));
        }

        Ok(serde_json::to_value(confidence_interval(&values, level))?)
    }
}

// ============ Welch t-Test ============

pub struct TTest;

static AB_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("a", "number", "First sample"),
    ArgMeta::list("b", "number", "Second sample"),
];

static TTEST_EXAMPLES: [&str; 1] = ["t_test([120,122,125], [130,131,135]) → {t_statistic: ..., p_value: ..., significant: true}"];

static TTEST_RELATED: [&str; 2] = ["effect_size", "compare_periods"];

impl ToolPlugin for TTest {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "t_test",
            description: "Welch two-sample t-test (unequal variances)",
            usage: "t_test(a, b)",
            args: &AB_ARGS,
            returns: "TTestResult",
            examples: &TTEST_EXAMPLES,
            category: "stats/inferential",
            related: &TTEST_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let a = args::numbers(args, "t_test", "a")?;
        let b = args::numbers(args, "t_test", "b")?;
        Ok(serde_json::to_value(welch_t_test(&a, &b))?)
    }
}

// ============ Effect Size ============

pub struct EffectSizeTool;

static EFFECT_EXAMPLES: [&str; 1] = ["effect_size([2,4,6], [1,3,5]) → {d: 0.5, interpretation: \"medium\"}"];

static EFFECT_RELATED: [&str; 1] = ["t_test"];

impl ToolPlugin for EffectSizeTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "effect_size",
            description: "Cohen's d of a against b with its conventional interpretation",
            usage: "effect_size(a, b)",
            args: &AB_ARGS,
            returns: "Object",
            examples: &EFFECT_EXAMPLES,
            category: "stats/inferential",
            related: &EFFECT_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let a = args::numbers(args, "effect_size", "a")?;
        let b = args::numbers(args, "effect_size", "b")?;
        let d = cohens_d(&a, &b);
        Ok(json!({
            "d": d,
            "interpretation": interpret_effect_size(d),
        }))
    }
}

// ============ Outliers ============

pub struct Outliers;

static OUTLIER_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("values", "number", "Sample data"),
    ArgMeta::optional("k", "number", "IQR multiplier for the fences", "1.5"),
];

static OUTLIER_EXAMPLES: [&str; 1] = ["outliers([1,2,3,4,100]) → {outliers: [100], indices: [4], ...}"];

static OUTLIER_RELATED: [&str; 2] = ["describe", "z_scores"];

impl ToolPlugin for Outliers {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "outliers",
            description: "Tukey fence outlier detection",
            usage: "outliers(values, k?)",
            args: &OUTLIER_ARGS,
            returns: "OutlierReport",
            examples: &OUTLIER_EXAMPLES,
            category: "stats/inferential",
            related: &OUTLIER_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "outliers", "values")?;
        let k = args::number_or(args, "outliers", "k", DEFAULT_IQR_MULTIPLIER)?;
        if k < 0.0 {
            return Err(TensioError::domain_error("outliers() requires k >= 0").at_field("k"));
        }
        Ok(serde_json::to_value(detect_outliers(&values, k))?)
    }
}

// ============ Smoothing ============

pub struct MovingAverage;

static MA_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("values", "number", "Series in time order"),
    ArgMeta::required("window", "integer", "Window length"),
];

static MA_EXAMPLES: [&str; 1] = ["moving_average([1,2,3,4], 2) → [1.5, 2.5, 3.5]"];

static MOVING_AVERAGE_RELATED: [&str; 2] = ["ema", "z_scores"];
static EMA_RELATED: [&str; 2] = ["moving_average", "z_scores"];

impl ToolPlugin for MovingAverage {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "moving_average",
            description: "Simple moving average; empty when the window does not fit",
            usage: "moving_average(values, window)",
            args: &MA_ARGS,
            returns: "List<Number>",
            examples: &MA_EXAMPLES,
            category: "stats/transform",
            related: &MOVING_AVERAGE_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "moving_average", "values")?;
        let window = args::count(args, "moving_average", "window")?;
        Ok(json!(moving_average(&values, window)))
    }
}

pub struct Ema;

static EMA_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("values", "number", "Series in time order"),
    ArgMeta::required("alpha", "number", "Smoothing factor, clamped to [0, 1]"),
];

static EMA_EXAMPLES: [&str; 1] = ["ema([1,2,3], 0.5) → [1, 1.5, 2.25]"];

impl ToolPlugin for Ema {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "ema",
            description: "Exponential moving average seeded with the first value",
            usage: "ema(values, alpha)",
            args: &EMA_ARGS,
            returns: "List<Number>",
            examples: &EMA_EXAMPLES,
            category: "stats/transform",
            related: &EMA_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let values = args::numbers(args, "ema", "values")?;
        if args.get("alpha").is_none() {
            return Err(TensioError::missing_arg("ema", "alpha"));
        }
        let alpha = args::number_or(args, "ema", "alpha", 0.5)?;
        Ok(json!(exponential_moving_average(&values, alpha)))
    }
}

// ============ Period Comparison ============

pub struct ComparePeriods;

static COMPARE_ARGS: [ArgMeta; 2] = [
    ArgMeta::list("period1", "number", "Baseline period"),
    ArgMeta::list("period2", "number", "Later period"),
];

static COMPARE_EXAMPLES: [&str; 1] = [
    "compare_periods([140,142,138], [130,128,132]) → {mean_difference: -10, percent_change: -7.14, ...}",
];

static COMPARE_RELATED: [&str; 3] = ["t_test", "effect_size", "week_over_week"];

impl ToolPlugin for ComparePeriods {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "compare_periods",
            description: "Before/after comparison with effect size, difference interval and Welch t-test",
            usage: "compare_periods(period1, period2)",
            args: &COMPARE_ARGS,
            returns: "PeriodComparisonResult",
            examples: &COMPARE_EXAMPLES,
            category: "stats/comparison",
            related: &COMPARE_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let p1 = args::numbers(args, "compare_periods", "period1")?;
        let p2 = args::numbers(args, "compare_periods", "period2")?;
        Ok(serde_json::to_value(compare_periods(&p1, &p2))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tensio_core::codes;

    fn ctx() -> ToolContext {
        ToolContext::new(Utc::now())
    }

    #[test]
    fn test_describe_tool() {
        let out = Describe.call(&json!({ "values": [120, 125, 130] }), &ctx()).unwrap();
        assert_eq!(out["n"], 3);
        assert_eq!(out["mean"], 125.0);
    }

    #[test]
    fn test_percentile_requires_p() {
        let err = Percentile.call(&json!({ "values": [1, 2] }), &ctx()).unwrap_err();
        assert_eq!(err.code, codes::MISSING_ARG);
        let out = Percentile.call(&json!({ "values": [1, 2, 3, 4, 5], "p": 50 }), &ctx()).unwrap();
        assert_eq!(out, json!(3.0));
    }

    #[test]
    fn test_ci_rejects_bad_level() {
        let err = Ci.call(&json!({ "values": [1, 2, 3], "level": 1.5 }), &ctx()).unwrap_err();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_effect_size_interpretation() {
        let out = EffectSizeTool.call(&json!({ "a": [2, 4, 6], "b": [1, 3, 5] }), &ctx()).unwrap();
        assert_eq!(out["interpretation"], "medium");
    }

    #[test]
    fn test_moving_average_tool() {
        let out = MovingAverage.call(&json!({ "values": [1, 2, 3, 4], "window": 2 }), &ctx()).unwrap();
        assert_eq!(out, json!([1.5, 2.5, 3.5]));
    }

    #[test]
    fn test_compare_periods_tool() {
        let out = ComparePeriods
            .call(&json!({ "period1": [140, 142, 138], "period2": [130, 128, 132] }), &ctx())
            .unwrap();
        assert_eq!(out["mean_difference"], -10.0);
    }
}
