//! Exercise days against rest days

use crate::buckets::{daily_bp, daily_exercise_minutes, mean_over};
use crate::insight::{Confidence, CorrelationInsight, InsightType};
use crate::thresholds::Thresholds;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tensio_core::{BpReading, ExerciseSession};
use tracing::debug;

/// Mean daily composite on exercise days and on rest days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestDayEffect {
    pub exercise_day_mean: f64,
    pub rest_day_mean: f64,
    /// `rest_day_mean - exercise_day_mean`; positive when rest days run higher
    pub difference: f64,
    pub exercise_days: usize,
    pub rest_days: usize,
}

/// Split the BP days by whether any session was logged that day.
/// `None` unless both groups have `min_days_per_group` days.
pub fn rest_day_effect(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    thresholds: &Thresholds,
) -> Option<RestDayEffect> {
    let bp = daily_bp(readings);
    let active = daily_exercise_minutes(sessions);

    let (exercise, rest): (Vec<&NaiveDate>, Vec<&NaiveDate>) =
        bp.keys().partition(|day| active.contains_key(*day));

    if exercise.len() < thresholds.min_days_per_group || rest.len() < thresholds.min_days_per_group {
        debug!(exercise_days = exercise.len(), rest_days = rest.len(), "rest-day effect: too few days");
        return None;
    }

    let exercise_day_mean = mean_over(&bp, exercise.iter().copied())?;
    let rest_day_mean = mean_over(&bp, rest.iter().copied())?;

    Some(RestDayEffect {
        exercise_day_mean,
        rest_day_mean,
        difference: rest_day_mean - exercise_day_mean,
        exercise_days: exercise.len(),
        rest_days: rest.len(),
    })
}

/// Report a rest-day effect of at least `significant_difference`
pub fn rest_day_impact(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    let effect = rest_day_effect(readings, sessions, thresholds)?;
    if effect.difference.abs() < thresholds.significant_difference {
        return None;
    }
    Some(rest_day_insight(&effect, thresholds))
}

pub(crate) fn rest_day_insight(effect: &RestDayEffect, thresholds: &Thresholds) -> CorrelationInsight {
    let confidence = if effect.difference.abs() >= thresholds.large_difference {
        Confidence::High
    } else {
        Confidence::Medium
    };

    let insight = if effect.difference > 0.0 {
        CorrelationInsight::new(
            InsightType::Positive,
            confidence,
            "Blood pressure is lower on exercise days",
            format!(
                "On the {} days you exercised, your blood pressure averaged {:.1} mmHg lower than on your {} rest days.",
                effect.exercise_days, effect.difference, effect.rest_days
            ),
        )
    } else {
        CorrelationInsight::new(
            InsightType::Negative,
            confidence,
            "Blood pressure is higher on exercise days",
            format!(
                "On the {} days you exercised, your blood pressure averaged {:.1} mmHg higher than on your {} rest days. \
                 Readings taken soon after a workout may be part of the reason.",
                effect.exercise_days,
                -effect.difference,
                effect.rest_days
            ),
        )
    };
    insight.with_metric("Rest-day difference", effect.difference, "mmHg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::fixtures::*;

    #[test]
    fn test_effect() {
        let (readings, sessions) = alternating();
        let effect = rest_day_effect(&readings, &sessions, &Thresholds::default()).unwrap();
        assert_eq!(effect.exercise_days, 3);
        assert_eq!(effect.rest_days, 3);
        // composites 93.33 and 105
        assert!((effect.difference - 35.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_impact_insight() {
        let (readings, sessions) = alternating();
        let insight = rest_day_impact(&readings, &sessions, &Thresholds::default()).unwrap();
        assert_eq!(insight.insight_type, InsightType::Positive);
        assert_eq!(insight.confidence, Confidence::High);
    }

    #[test]
    fn test_needs_two_days_each() {
        let (readings, _) = alternating();
        let sessions = vec![ExerciseSession::new(at(0, 18), 30.0)];
        assert!(rest_day_effect(&readings, &sessions, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_small_difference_not_reported() {
        let readings: Vec<_> = (0..4).map(|d| reading(d, 8, 120.0 + d as f64, 80.0)).collect();
        let sessions = vec![ExerciseSession::new(at(0, 18), 30.0), ExerciseSession::new(at(1, 18), 30.0)];
        assert!(rest_day_effect(&readings, &sessions, &Thresholds::default()).is_some());
        assert!(rest_day_impact(&readings, &sessions, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_difference_of_exactly_five_is_reported() {
        // composites 100 on exercise days, 105 on rest days
        let readings: Vec<_> = (0..6)
            .map(|d| if d % 2 == 0 { reading(d, 8, 120.0, 90.0) } else { reading(d, 8, 125.0, 95.0) })
            .collect();
        let sessions: Vec<_> = (0..6).step_by(2).map(|d| ExerciseSession::new(at(d, 18), 30.0)).collect();
        let insight = rest_day_impact(&readings, &sessions, &Thresholds::default()).unwrap();
        assert_eq!(insight.confidence, Confidence::Medium);
        assert_eq!(insight.metric.unwrap().value, 5.0);
    }
}
