//! Week-over-week summary and logging streak

use crate::category::BpCategory;
use crate::insight::{Confidence, CorrelationInsight, InsightType};
use crate::thresholds::Thresholds;
use chrono::{DateTime, Days, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tensio_core::time::day_key;
use tensio_core::{BpReading, DietEntry, ExerciseSession};
use tensio_stats::mean;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekSummary {
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
    pub avg_pulse: f64,
    pub total_exercise_minutes: f64,
    pub meal_count: usize,
    pub reading_count: usize,
    /// Category of the average reading; absent when the week has no readings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<BpCategory>,
}

/// `this_week - last_week` for every summary field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekChanges {
    pub systolic: f64,
    pub diastolic: f64,
    pub pulse: f64,
    pub exercise_minutes: f64,
    pub meals: i64,
    pub readings: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekOverWeekComparison {
    pub this_week: WeekSummary,
    pub last_week: WeekSummary,
    pub changes: WeekChanges,
}

fn summarize(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    entries: &[DietEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> WeekSummary {
    let in_window = |at: &DateTime<Utc>| *at > start && *at <= end;

    let week: Vec<&BpReading> = readings.iter().filter(|r| in_window(&r.taken_at)).collect();
    let systolic: Vec<f64> = week.iter().map(|r| r.systolic).collect();
    let diastolic: Vec<f64> = week.iter().map(|r| r.diastolic).collect();
    let pulse: Vec<f64> = week.iter().map(|r| r.pulse).collect();

    let avg_systolic = mean(&systolic);
    let avg_diastolic = mean(&diastolic);

    WeekSummary {
        avg_systolic,
        avg_diastolic,
        avg_pulse: mean(&pulse),
        total_exercise_minutes: sessions
            .iter()
            .filter(|s| in_window(&s.performed_at))
            .map(|s| s.duration_minutes)
            .sum(),
        meal_count: entries.iter().filter(|e| in_window(&e.eaten_at)).count(),
        reading_count: week.len(),
        category: (!week.is_empty()).then(|| BpCategory::classify(avg_systolic, avg_diastolic)),
    }
}

/// Compare `(now - 7d, now]` with `(now - 14d, now - 7d]`
pub fn week_over_week(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    entries: &[DietEntry],
    now: DateTime<Utc>,
) -> WeekOverWeekComparison {
    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let this_week = summarize(readings, sessions, entries, week_ago, now);
    let last_week = summarize(readings, sessions, entries, two_weeks_ago, week_ago);

    let changes = WeekChanges {
        systolic: this_week.avg_systolic - last_week.avg_systolic,
        diastolic: this_week.avg_diastolic - last_week.avg_diastolic,
        pulse: this_week.avg_pulse - last_week.avg_pulse,
        exercise_minutes: this_week.total_exercise_minutes - last_week.total_exercise_minutes,
        meals: this_week.meal_count as i64 - last_week.meal_count as i64,
        readings: this_week.reading_count as i64 - last_week.reading_count as i64,
    };

    WeekOverWeekComparison { this_week, last_week, changes }
}

/// Report a systolic change of at least `significant_difference` between
/// two weeks that both have readings
pub fn week_over_week_insight(
    comparison: &WeekOverWeekComparison,
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    if comparison.this_week.reading_count == 0 || comparison.last_week.reading_count == 0 {
        return None;
    }
    let change = comparison.changes.systolic;
    if change.abs() < thresholds.significant_difference {
        return None;
    }

    let insight = if change < 0.0 {
        CorrelationInsight::new(
            InsightType::Positive,
            Confidence::Medium,
            "Better than last week",
            format!("Your average systolic pressure is {:.0} mmHg lower than last week.", -change),
        )
    } else {
        CorrelationInsight::new(
            InsightType::Negative,
            Confidence::Medium,
            "Higher than last week",
            format!("Your average systolic pressure is {:.0} mmHg higher than last week.", change),
        )
    };
    Some(insight.with_metric("Systolic change", change, "mmHg"))
}

/// Consecutive days with at least one reading, ending today or yesterday
pub fn logging_streak(readings: &[BpReading], now: DateTime<Utc>) -> u32 {
    let days: BTreeSet<_> = readings.iter().map(|r| day_key(&r.taken_at)).collect();

    let today = day_key(&now);
    let mut day = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
