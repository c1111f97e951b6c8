//! Exercise and blood pressure

use crate::buckets::{daily_bp, daily_exercise_minutes, mean_over, paired};
use crate::insight::{correlation_confidence, Confidence, CorrelationInsight, InsightType};
use crate::rest_day::{rest_day_effect, rest_day_insight};
use crate::thresholds::Thresholds;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use tensio_core::time::day_key;
use tensio_core::{BpReading, ExerciseSession, TimeOfDay};
use tensio_stats::{mean, pearson_correlation};
use tracing::debug;

/// At most one insight relating exercise to blood pressure.
///
/// A rest-day effect above `significant_difference` wins; otherwise the
/// day-level correlation is reported when it reaches `moderate_correlation`.
pub fn exercise_correlation(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    if readings.len() < thresholds.min_bp_readings || sessions.len() < thresholds.min_exercise_entries {
        debug!(readings = readings.len(), sessions = sessions.len(), "exercise correlation: too little data");
        return None;
    }

    let bp = daily_bp(readings);
    let minutes = daily_exercise_minutes(sessions);
    let (bp_values, minute_values) = paired(&bp, &minutes);
    if bp_values.len() < thresholds.min_common_days {
        debug!(common_days = bp_values.len(), "exercise correlation: too few common days");
        return None;
    }

    if let Some(effect) = rest_day_effect(readings, sessions, thresholds) {
        if effect.difference > thresholds.significant_difference {
            return Some(rest_day_insight(&effect, thresholds));
        }
    }

    let r = pearson_correlation(&minute_values, &bp_values);
    if r.abs() < thresholds.moderate_correlation {
        return None;
    }
    let confidence = correlation_confidence(r, thresholds.strong_correlation);

    if r < 0.0 {
        let mut description = format!(
            "Days with more exercise tend to have lower blood pressure (r = {:.2}).",
            r
        );
        if let Some(best) = best_time_of_day(readings, sessions) {
            description.push_str(&format!(" Your lowest readings follow {} workouts.", best.as_str()));
        }
        return Some(
            CorrelationInsight::new(InsightType::Positive, confidence, "Exercise is lowering your blood pressure", description)
                .with_metric("Correlation", r, "r"),
        );
    }

    let elevation = post_exercise_elevation(readings, sessions, thresholds.post_exercise_window_hours);
    if elevation > thresholds.large_difference {
        return Some(
            CorrelationInsight::new(
                InsightType::Negative,
                confidence,
                "Temporary post-workout spikes",
                format!(
                    "Readings taken within {} hours of a workout average {:.0} mmHg higher systolic. \
                     This is a normal short-term response; measure at rest for a truer picture.",
                    thresholds.post_exercise_window_hours, elevation
                ),
            )
            .with_metric("Post-exercise elevation", elevation, "mmHg"),
        );
    }

    Some(
        CorrelationInsight::new(
            InsightType::Neutral,
            Confidence::Low,
            "Exercise and blood pressure rise together",
            format!(
                "Days with more exercise show slightly higher blood pressure (r = {:.2}). \
                 Other factors on active days may be involved.",
                r
            ),
        )
        .with_metric("Correlation", r, "r"),
    )
}

/// Mean systolic of readings taken within `window_hours` after a session,
/// minus the mean systolic of all other readings. 0 when either side is empty.
///
/// A negative or NaN window counts as zero; a window too large to represent
/// covers every later reading.
pub fn post_exercise_elevation(readings: &[BpReading], sessions: &[ExerciseSession], window_hours: f64) -> f64 {
    let window_ms = if window_hours.is_nan() { 0.0 } else { window_hours.max(0.0) * 3_600_000.0 };
    // `None` means unbounded
    let window = if window_ms < i64::MAX as f64 {
        Duration::try_milliseconds(window_ms as i64)
    } else {
        None
    };

    let (after, other): (Vec<&BpReading>, Vec<&BpReading>) = readings.iter().partition(|r| {
        sessions.iter().any(|s| {
            if r.taken_at < s.performed_at {
                return false;
            }
            match window.and_then(|w| s.performed_at.checked_add_signed(w)) {
                Some(end) => r.taken_at <= end,
                None => true,
            }
        })
    });

    if after.is_empty() || other.is_empty() {
        return 0.0;
    }

    let after: Vec<f64> = after.iter().map(|r| r.systolic).collect();
    let other: Vec<f64> = other.iter().map(|r| r.systolic).collect();
    mean(&after) - mean(&other)
}

/// Part of the day whose workout days have the lowest mean daily BP.
/// `None` unless at least two parts of the day have data.
pub fn best_time_of_day(readings: &[BpReading], sessions: &[ExerciseSession]) -> Option<TimeOfDay> {
    let bp = daily_bp(readings);

    let mut days_by_bucket: BTreeMap<TimeOfDay, BTreeSet<NaiveDate>> = BTreeMap::new();
    for s in sessions {
        days_by_bucket
            .entry(TimeOfDay::of(&s.performed_at))
            .or_default()
            .insert(day_key(&s.performed_at));
    }

    let means: Vec<(TimeOfDay, f64)> = days_by_bucket
        .iter()
        .filter_map(|(bucket, days)| mean_over(&bp, days).map(|m| (*bucket, m)))
        .collect();

    if means.len() < 2 {
        return None;
    }
    means
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(bucket, _)| bucket)
}
