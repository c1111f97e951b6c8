//! Tensio Insights
//!
//! Turns blood-pressure readings, exercise, diet and medication logs into
//! ranked, human-readable insights. Every analysis short-circuits to `None`
//! (or an empty list) when its sample-size minimum is not met.

mod buckets;
mod category;
mod diet;
mod engine;
mod exercise;
mod insight;
mod medication;
mod predictive;
mod rest_day;
mod sodium;
mod thresholds;
mod tools;
mod trend;
mod weekly;

pub use buckets::{daily_adherence, daily_bp, daily_exercise_minutes, daily_meal_count, DailySeries};
pub use category::{classify_reading, BpCategory};
pub use diet::{diet_correlation, sodium_next_day_impact};
pub use engine::{HealthData, InsightEngine};
pub use exercise::{best_time_of_day, exercise_correlation, post_exercise_elevation};
pub use insight::{rank_insights, Confidence, CorrelationInsight, InsightMetric, InsightType};
pub use medication::medication_correlation;
pub use predictive::predictive_insights;
pub use rest_day::{rest_day_effect, rest_day_impact, RestDayEffect};
pub use sodium::{KeywordSodiumClassifier, SodiumClassifier, DEFAULT_SODIUM_KEYWORDS};
pub use thresholds::Thresholds;
pub use trend::{bp_trend, trend_insight, BpTrend, TrendDirection};
pub use weekly::{
    logging_streak, week_over_week, week_over_week_insight, WeekChanges, WeekOverWeekComparison,
    WeekSummary,
};

use tensio_plugin::ToolRegistry;

/// Load insight tools into registry
pub fn load_insight_tools(registry: ToolRegistry) -> ToolRegistry {
    registry
        .with_tool(tools::BpTrendTool)
        .with_tool(tools::WeekOverWeekTool)
        .with_tool(tools::ExerciseCorrelationTool)
        .with_tool(tools::DietCorrelationTool)
        .with_tool(tools::MedicationCorrelationTool)
        .with_tool(tools::RestDayImpactTool)
        .with_tool(tools::PredictiveInsightsTool)
        .with_tool(tools::InsightsTool)
        .with_tool(tools::ClassifyTool)
        .with_tool(tools::LoggingStreakTool)
}
