//! Tool plugins over the insight engine

use crate::{
    bp_trend, classify_reading, diet_correlation, exercise_correlation, logging_streak,
    medication_correlation, predictive_insights, rest_day_impact, trend_insight, week_over_week,
    HealthData, InsightEngine, KeywordSodiumClassifier, Thresholds,
};
use tensio_core::RecordError;
use tensio_plugin::prelude::*;

// ============ Argument Decoding ============

fn validate_each<T>(
    items: &[T],
    tool: &str,
    name: &str,
    check: impl Fn(&T) -> Result<(), RecordError>,
) -> Result<(), TensioError> {
    for (i, item) in items.iter().enumerate() {
        check(item).map_err(|e| {
            TensioError::from(e)
                .in_tool(tool)
                .at_index(i)
                .with_note(format!("in '{}'", name))
        })?;
    }
    Ok(())
}

fn readings(args: &JsonValue, tool: &str, required: bool) -> Result<Vec<BpReading>, TensioError> {
    let list: Vec<BpReading> = args::records(args, tool, "readings", required)?;
    validate_each(&list, tool, "readings", BpReading::validate)?;
    Ok(list)
}

fn exercise(args: &JsonValue, tool: &str, required: bool) -> Result<Vec<ExerciseSession>, TensioError> {
    let list: Vec<ExerciseSession> = args::records(args, tool, "exercise", required)?;
    validate_each(&list, tool, "exercise", ExerciseSession::validate)?;
    Ok(list)
}

fn diet(args: &JsonValue, tool: &str, required: bool) -> Result<Vec<DietEntry>, TensioError> {
    let list: Vec<DietEntry> = args::records(args, tool, "diet", required)?;
    validate_each(&list, tool, "diet", DietEntry::validate)?;
    Ok(list)
}

fn doses(args: &JsonValue, tool: &str, required: bool) -> Result<Vec<MedicationDose>, TensioError> {
    args::records(args, tool, "doses", required)
}

/// Server thresholds with any per-call `thresholds` object laid over them
fn thresholds(args: &JsonValue, ctx: &ToolContext, tool: &str) -> Result<Thresholds, TensioError> {
    let base: Thresholds = ctx.section("thresholds")?;
    let merged = match args.get("thresholds") {
        None | Some(JsonValue::Null) => Ok(base),
        Some(JsonValue::Object(overrides)) => {
            let mut merged = serde_json::to_value(&base)?;
            if let JsonValue::Object(fields) = &mut merged {
                for (key, value) in overrides {
                    fields.insert(key.clone(), value.clone());
                }
            }
            serde_json::from_value(merged).map_err(|e| {
                TensioError::arg_type(tool, "thresholds", "Thresholds object").with_note(e.to_string())
            })
        }
        Some(_) => Err(TensioError::arg_type(tool, "thresholds", "object")),
    }?;
    match merged.invalid_field() {
        Some(field) => Err(TensioError::arg_type(tool, "thresholds", "finite, non-negative thresholds")
            .with_note(format!("invalid value for {}", field))),
        None => Ok(merged),
    }
}

fn now(args: &JsonValue, ctx: &ToolContext, tool: &str) -> Result<chrono::DateTime<chrono::Utc>, TensioError> {
    Ok(args::timestamp(args, tool, "now")?.unwrap_or(ctx.now))
}

const READINGS: ArgMeta = ArgMeta::list("readings", "BpReading", "Readings {taken_at, systolic, diastolic, pulse}");
const OPT_READINGS: ArgMeta = ArgMeta::optional_list("readings", "BpReading", "Readings {taken_at, systolic, diastolic, pulse}");
const EXERCISE: ArgMeta = ArgMeta::list("exercise", "ExerciseSession", "Sessions {performed_at, duration_minutes}");
const OPT_EXERCISE: ArgMeta = ArgMeta::optional_list("exercise", "ExerciseSession", "Sessions {performed_at, duration_minutes}");
const DIET: ArgMeta = ArgMeta::list("diet", "DietEntry", "Meals {eaten_at, meal_type, description, notes?, sodium_mg?}");
const OPT_DIET: ArgMeta = ArgMeta::optional_list("diet", "DietEntry", "Meals {eaten_at, meal_type, description, notes?, sodium_mg?}");
const DOSES: ArgMeta = ArgMeta::list("doses", "MedicationDose", "Doses {scheduled_at, taken}");
const OPT_DOSES: ArgMeta = ArgMeta::optional_list("doses", "MedicationDose", "Doses {scheduled_at, taken}");
const THRESHOLDS: ArgMeta = ArgMeta::optional("thresholds", "object", "Threshold overrides", "server thresholds");
const NOW: ArgMeta = ArgMeta::optional("now", "string", "Reference instant (RFC 3339)", "current time");

// ============ Trend ============

pub struct BpTrendTool;

static TREND_ARGS: [ArgMeta; 2] = [READINGS, THRESHOLDS];

static TREND_EXAMPLES: [&str; 1] = [
    "bp_trend(readings) → {trend: {slope: -2, direction: \"improving\", weekly_change: -14, ...}, insight: {...}}",
];

static TREND_RELATED: [&str; 2] = ["regress", "predictive_insights"];

impl ToolPlugin for BpTrendTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "bp_trend",
            description: "Systolic trend: slope per day, weekly change, direction and 30-day projection",
            usage: "bp_trend(readings, thresholds?)",
            args: &TREND_ARGS,
            returns: "Object",
            examples: &TREND_EXAMPLES,
            category: "insights/trend",
            related: &TREND_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let readings = readings(args, "bp_trend", true)?;
        let t = thresholds(args, ctx, "bp_trend")?;
        let trend = bp_trend(&readings, &t);
        let insight = trend.as_ref().map(trend_insight);
        Ok(json!({ "trend": trend, "insight": insight }))
    }
}

// ============ Week over Week ============

pub struct WeekOverWeekTool;

static WEEK_ARGS: [ArgMeta; 4] = [OPT_READINGS, OPT_EXERCISE, OPT_DIET, NOW];

static WEEK_EXAMPLES: [&str; 1] = ["week_over_week(readings, exercise, diet, now) → {this_week, last_week, changes}"];

static WEEK_RELATED: [&str; 2] = ["compare_periods", "logging_streak"];

impl ToolPlugin for WeekOverWeekTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "week_over_week",
            description: "This week against last week: averages, totals and signed changes",
            usage: "week_over_week(readings?, exercise?, diet?, now?)",
            args: &WEEK_ARGS,
            returns: "WeekOverWeekComparison",
            examples: &WEEK_EXAMPLES,
            category: "insights/trend",
            related: &WEEK_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "week_over_week";
        let cmp = week_over_week(
            &readings(args, tool, false)?,
            &exercise(args, tool, false)?,
            &diet(args, tool, false)?,
            now(args, ctx, tool)?,
        );
        Ok(serde_json::to_value(cmp)?)
    }
}

// ============ Correlations ============

pub struct ExerciseCorrelationTool;

static EXERCISE_ARGS: [ArgMeta; 3] = [READINGS, EXERCISE, THRESHOLDS];

static CORRELATION_EXAMPLES: [&str; 1] = ["exercise_correlation(readings, exercise) → CorrelationInsight or null"];

static EXERCISE_RELATED: [&str; 3] = ["rest_day_impact", "diet_correlation", "medication_correlation"];
static DIET_RELATED: [&str; 3] = ["exercise_correlation", "medication_correlation", "insights"];
static MEDICATION_RELATED: [&str; 3] = ["exercise_correlation", "diet_correlation", "insights"];
static REST_DAY_RELATED: [&str; 2] = ["exercise_correlation", "predictive_insights"];

impl ToolPlugin for ExerciseCorrelationTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "exercise_correlation",
            description: "How exercise relates to blood pressure (rest-day effect, correlation, post-workout spikes)",
            usage: "exercise_correlation(readings, exercise, thresholds?)",
            args: &EXERCISE_ARGS,
            returns: "CorrelationInsight | null",
            examples: &CORRELATION_EXAMPLES,
            category: "insights/correlation",
            related: &EXERCISE_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "exercise_correlation";
        let insight = exercise_correlation(
            &readings(args, tool, true)?,
            &exercise(args, tool, true)?,
            &thresholds(args, ctx, tool)?,
        );
        Ok(serde_json::to_value(insight)?)
    }
}

pub struct DietCorrelationTool;

static DIET_ARGS: [ArgMeta; 3] = [READINGS, DIET, THRESHOLDS];

impl ToolPlugin for DietCorrelationTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "diet_correlation",
            description: "How meals relate to blood pressure (meal count, meal type, timing, sodium)",
            usage: "diet_correlation(readings, diet, thresholds?)",
            args: &DIET_ARGS,
            returns: "CorrelationInsight | null",
            examples: &[],
            category: "insights/correlation",
            related: &DIET_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "diet_correlation";
        let insight = diet_correlation(
            &readings(args, tool, true)?,
            &diet(args, tool, true)?,
            &thresholds(args, ctx, tool)?,
        );
        Ok(serde_json::to_value(insight)?)
    }
}

pub struct MedicationCorrelationTool;

static MEDICATION_ARGS: [ArgMeta; 3] = [READINGS, DOSES, THRESHOLDS];

impl ToolPlugin for MedicationCorrelationTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "medication_correlation",
            description: "How dose adherence relates to blood pressure, with a low-adherence warning",
            usage: "medication_correlation(readings, doses, thresholds?)",
            args: &MEDICATION_ARGS,
            returns: "CorrelationInsight | null",
            examples: &[],
            category: "insights/correlation",
            related: &MEDICATION_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "medication_correlation";
        let insight = medication_correlation(
            &readings(args, tool, true)?,
            &doses(args, tool, true)?,
            &thresholds(args, ctx, tool)?,
        );
        Ok(serde_json::to_value(insight)?)
    }
}

pub struct RestDayImpactTool;

impl ToolPlugin for RestDayImpactTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "rest_day_impact",
            description: "Blood pressure on exercise days against rest days",
            usage: "rest_day_impact(readings, exercise, thresholds?)",
            args: &EXERCISE_ARGS,
            returns: "CorrelationInsight | null",
            examples: &[],
            category: "insights/correlation",
            related: &REST_DAY_RELATED,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "rest_day_impact";
        let insight = rest_day_impact(
            &readings(args, tool, true)?,
            &exercise(args, tool, true)?,
            &thresholds(args, ctx, tool)?,
        );
        Ok(serde_json::to_value(insight)?)
    }
}

// ============ Predictive & Engine ============

pub struct PredictiveInsightsTool;

static ALL_ARGS: [ArgMeta; 5] = [OPT_READINGS, OPT_EXERCISE, OPT_DIET, OPT_DOSES, THRESHOLDS];

impl ToolPlugin for PredictiveInsightsTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "predictive_insights",
            description: "Heuristic projections: skipped exercise, missed morning doses, salty meals, 30-day trend",
            usage: "predictive_insights(readings?, exercise?, diet?, doses?, thresholds?)",
            args: &ALL_ARGS,
            returns: "List<CorrelationInsight>",
            examples: &[],
            category: "insights/predictive",
            related: &["insights", "bp_trend"],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "predictive_insights";
        let insights = predictive_insights(
            &readings(args, tool, false)?,
            &exercise(args, tool, false)?,
            &diet(args, tool, false)?,
            &doses(args, tool, false)?,
            &KeywordSodiumClassifier::default(),
            &thresholds(args, ctx, tool)?,
        );
        Ok(serde_json::to_value(insights)?)
    }
}

pub struct InsightsTool;

static INSIGHTS_ARGS: [ArgMeta; 6] = [OPT_READINGS, OPT_EXERCISE, OPT_DIET, OPT_DOSES, THRESHOLDS, NOW];

static INSIGHTS_EXAMPLES: [&str; 1] = ["insights(readings, exercise, diet, doses) → ranked List<CorrelationInsight>"];

impl ToolPlugin for InsightsTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "insights",
            description: "Every insight the data supports, de-duplicated and ranked most important first",
            usage: "insights(readings?, exercise?, diet?, doses?, thresholds?, now?)",
            args: &INSIGHTS_ARGS,
            returns: "List<CorrelationInsight>",
            examples: &INSIGHTS_EXAMPLES,
            category: "insights/engine",
            related: &["predictive_insights", "bp_trend", "week_over_week"],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "insights";
        let data = HealthData {
            readings: readings(args, tool, false)?,
            exercise: exercise(args, tool, false)?,
            diet: diet(args, tool, false)?,
            doses: doses(args, tool, false)?,
        };
        let engine = InsightEngine::new(thresholds(args, ctx, tool)?);
        Ok(serde_json::to_value(engine.generate(&data, now(args, ctx, tool)?))?)
    }
}

// ============ Readings ============

pub struct ClassifyTool;

static CLASSIFY_ARGS: [ArgMeta; 1] = [READINGS];

impl ToolPlugin for ClassifyTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "classify_readings",
            description: "ACC/AHA category of each reading",
            usage: "classify_readings(readings)",
            args: &CLASSIFY_ARGS,
            returns: "List<String>",
            examples: &["classify_readings([{systolic: 135, diastolic: 85, ...}]) → [\"stage1\"]"],
            category: "insights/readings",
            related: &["week_over_week"],
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let readings = readings(args, "classify_readings", true)?;
        let categories: Vec<_> = readings.iter().map(classify_reading).collect();
        Ok(serde_json::to_value(categories)?)
    }
}

pub struct LoggingStreakTool;

static STREAK_ARGS: [ArgMeta; 2] = [READINGS, NOW];

impl ToolPlugin for LoggingStreakTool {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "logging_streak",
            description: "Consecutive days with at least one reading, ending today or yesterday",
            usage: "logging_streak(readings, now?)",
            args: &STREAK_ARGS,
            returns: "Number",
            examples: &[],
            category: "insights/readings",
            related: &["week_over_week"],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        let tool = "logging_streak";
        let readings = readings(args, tool, true)?;
        Ok(json!(logging_streak(&readings, now(args, ctx, tool)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx() -> ToolContext {
        ToolContext::new(Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap())
    }

    fn falling_readings() -> JsonValue {
        let list: Vec<JsonValue> = (0..5)
            .map(|d| {
                json!({
                    "taken_at": format!("2025-03-0{}T08:00:00Z", d + 1),
                    "systolic": 150.0 - 2.0 * d as f64,
                    "diastolic": 90,
                    "pulse": 70,
                })
            })
            .collect();
        JsonValue::Array(list)
    }

    #[test]
    fn test_bp_trend_tool() {
        let out = BpTrendTool.call(&json!({ "readings": falling_readings() }), &ctx()).unwrap();
        assert_eq!(out["trend"]["direction"], "improving");
        assert_eq!(out["insight"]["type"], "positive");
    }

    #[test]
    fn test_threshold_override() {
        let args = json!({ "readings": falling_readings(), "thresholds": { "min_trend_readings": 6 } });
        let out = BpTrendTool.call(&args, &ctx()).unwrap();
        assert!(out["trend"].is_null());
    }

    #[test]
    fn test_server_thresholds_apply() {
        let ctx = ctx().with_settings(json!({ "thresholds": { "trend_band": 20.0 } }));
        let out = BpTrendTool.call(&json!({ "readings": falling_readings() }), &ctx).unwrap();
        assert_eq!(out["trend"]["direction"], "stable");
    }

    #[test]
    fn test_bad_threshold_type() {
        let args = json!({ "readings": falling_readings(), "thresholds": { "trend_band": "wide" } });
        let err = BpTrendTool.call(&args, &ctx()).unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_out_of_range_window() {
        // positively correlated days, so the post-exercise window is consulted
        let readings: Vec<JsonValue> = (0..5)
            .map(|d| {
                json!({
                    "taken_at": format!("2025-03-0{}T20:00:00Z", d + 1),
                    "systolic": 120.0 + 3.0 * d as f64,
                    "diastolic": 80,
                    "pulse": 70,
                })
            })
            .collect();
        let exercise: Vec<JsonValue> = (0..5)
            .map(|d| json!({ "performed_at": format!("2025-03-0{}T07:00:00Z", d + 1), "duration_minutes": 10 * (d + 1) }))
            .collect();

        let args = json!({ "readings": readings, "exercise": exercise, "thresholds": { "post_exercise_window_hours": 1e12 } });
        let out = ExerciseCorrelationTool.call(&args, &ctx()).unwrap();
        assert_eq!(out["title"], "Exercise and blood pressure rise together");

        let args = json!({ "readings": readings, "exercise": exercise, "thresholds": { "post_exercise_window_hours": -1e20 } });
        let err = ExerciseCorrelationTool.call(&args, &ctx()).unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);

        let args = json!({ "readings": readings, "thresholds": { "post_exercise_window_hours": -1 } });
        assert!(InsightsTool.call(&args, &ctx()).is_err());
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let args = json!({
            "readings": [{ "taken_at": "2025-03-01T08:00:00Z", "systolic": 120, "diastolic": 80, "pulse": 70 }],
            "exercise": [{ "performed_at": "2025-03-01T07:00:00Z", "duration_minutes": -5 }],
        });
        let err = ExerciseCorrelationTool.call(&args, &ctx()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_RECORD);
        assert_eq!(err.context.and_then(|c| c.index), Some(0));
    }

    #[test]
    fn test_week_over_week_defaults_to_context_now() {
        let args = json!({
            "readings": [
                { "taken_at": "2025-03-14T08:00:00Z", "systolic": 128, "diastolic": 82, "pulse": 70 },
                { "taken_at": "2025-03-13T08:00:00Z", "systolic": 132, "diastolic": 84, "pulse": 70 },
                { "taken_at": "2025-03-07T08:00:00Z", "systolic": 138, "diastolic": 88, "pulse": 70 },
                { "taken_at": "2025-03-06T08:00:00Z", "systolic": 142, "diastolic": 90, "pulse": 70 },
            ]
        });
        let out = WeekOverWeekTool.call(&args, &ctx()).unwrap();
        assert_eq!(out["changes"]["systolic"], -10.0);
    }

    #[test]
    fn test_insights_tool_empty() {
        let out = InsightsTool.call(&json!({}), &ctx()).unwrap();
        assert_eq!(out, json!([]));
    }

    #[test]
    fn test_no_tool_is_related_to_itself() {
        let registry = crate::load_insight_tools(ToolRegistry::new());
        for schema in registry.tool_schemas() {
            let name = schema["name"].as_str().unwrap();
            let meta = registry.get_tool(name).unwrap().meta();
            assert!(!meta.related.contains(&name), "{} lists itself", name);
        }
    }

    #[test]
    fn test_classify_readings() {
        let args = json!({
            "readings": [{ "taken_at": "2025-03-01T08:00:00Z", "systolic": 135, "diastolic": 85, "pulse": 70 }]
        });
        let out = ClassifyTool.call(&args, &ctx()).unwrap();
        assert_eq!(out, json!(["stage1"]));
    }
}
