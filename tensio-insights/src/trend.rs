//! Systolic trend over time

use crate::insight::{Confidence, CorrelationInsight, InsightType};
use crate::thresholds::Thresholds;
use serde::{Deserialize, Serialize};
use tensio_core::time::elapsed_days;
use tensio_core::BpReading;
use tensio_stats::linear_regression;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Worsening,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpTrend {
    /// mmHg per day
    pub slope: f64,
    pub direction: TrendDirection,
    /// mmHg per week
    pub weekly_change: f64,
    pub confidence: Confidence,
    pub projected_change_30_days: f64,
    pub r_squared: f64,
    pub readings: usize,
}

/// Regress systolic on fractional days since the earliest reading.
/// `None` below `min_trend_readings` readings.
pub fn bp_trend(readings: &[BpReading], thresholds: &Thresholds) -> Option<BpTrend> {
    let n = readings.len();
    if n < thresholds.min_trend_readings {
        debug!(readings = n, "bp trend: too few readings");
        return None;
    }

    let first = readings.iter().map(|r| r.taken_at).min()?;
    let x: Vec<f64> = readings.iter().map(|r| elapsed_days(&first, &r.taken_at)).collect();
    let y: Vec<f64> = readings.iter().map(|r| r.systolic).collect();
    let fit = linear_regression(&x, &y);

    let weekly_change = fit.slope * 7.0;
    let direction = if weekly_change < -thresholds.trend_band {
        TrendDirection::Improving
    } else if weekly_change > thresholds.trend_band {
        TrendDirection::Worsening
    } else {
        TrendDirection::Stable
    };

    let confidence = if fit.r_squared > thresholds.high_confidence_r_squared && n >= thresholds.high_confidence_readings {
        Confidence::High
    } else if fit.r_squared > thresholds.medium_confidence_r_squared && n >= thresholds.medium_confidence_readings {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    Some(BpTrend {
        slope: fit.slope,
        direction,
        weekly_change,
        confidence,
        projected_change_30_days: fit.slope * 30.0,
        r_squared: fit.r_squared,
        readings: n,
    })
}

pub fn trend_insight(trend: &BpTrend) -> CorrelationInsight {
    let insight = match trend.direction {
        TrendDirection::Improving => CorrelationInsight::new(
            InsightType::Positive,
            trend.confidence,
            "Blood pressure is trending down",
            format!(
                "Your systolic pressure is falling by about {:.1} mmHg per week.",
                -trend.weekly_change
            ),
        ),
        TrendDirection::Worsening => CorrelationInsight::new(
            InsightType::Negative,
            trend.confidence,
            "Blood pressure is trending up",
            format!(
                "Your systolic pressure is rising by about {:.1} mmHg per week.",
                trend.weekly_change
            ),
        ),
        TrendDirection::Stable => CorrelationInsight::new(
            InsightType::Neutral,
            trend.confidence,
            "Blood pressure is stable",
            format!(
                "Your systolic pressure has held steady across {} readings.",
                trend.readings
            ),
        ),
    };
    insight.with_metric("Weekly change", trend.weekly_change, "mmHg/week")
}
