//! Forward-looking heuristics
//!
//! These project observed associations forward. They are estimates, and
//! every description is worded as something that could or may happen.

use crate::buckets::{daily_bp, mean_over};
use crate::insight::{Confidence, CorrelationInsight, InsightType};
use crate::rest_day::rest_day_effect;
use crate::sodium::SodiumClassifier;
use crate::thresholds::Thresholds;
use crate::trend::{bp_trend, TrendDirection};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tensio_core::time::day_key;
use tensio_core::{BpReading, DietEntry, ExerciseSession, MedicationDose, TimeOfDay};

/// All predictive insights the data supports, in a fixed order
pub fn predictive_insights(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    entries: &[DietEntry],
    doses: &[MedicationDose],
    classifier: &dyn SodiumClassifier,
    thresholds: &Thresholds,
) -> Vec<CorrelationInsight> {
    [
        skipped_exercise(readings, sessions, thresholds),
        missed_morning_dose(readings, doses, thresholds),
        salty_meals(readings, entries, classifier, thresholds),
        trend_projection(readings, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn skipped_exercise(
    readings: &[BpReading],
    sessions: &[ExerciseSession],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    let effect = rest_day_effect(readings, sessions, thresholds)?;
    if effect.difference < thresholds.significant_difference {
        return None;
    }
    let projected = effect.difference * thresholds.rest_day_projection_factor;
    Some(
        CorrelationInsight::new(
            InsightType::Neutral,
            Confidence::Low,
            "Skipping exercise could raise your blood pressure",
            format!(
                "Based on your rest days, a week without exercise could raise your blood pressure by about {:.0} mmHg.",
                projected
            ),
        )
        .with_metric("Projected increase", projected, "mmHg"),
    )
}

/// Same-day BP on days with a missed morning dose against days where every
/// morning dose was taken
fn missed_morning_dose(
    readings: &[BpReading],
    doses: &[MedicationDose],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    let mut missed = BTreeSet::new();
    let mut morning_days = BTreeSet::new();
    for d in doses.iter().filter(|d| TimeOfDay::of(&d.scheduled_at) == TimeOfDay::Morning) {
        let day = day_key(&d.scheduled_at);
        morning_days.insert(day);
        if !d.taken {
            missed.insert(day);
        }
    }
    let taken: BTreeSet<NaiveDate> = morning_days.difference(&missed).copied().collect();

    let bp = daily_bp(readings);
    let missed_days: Vec<&NaiveDate> = missed.iter().filter(|d| bp.contains_key(*d)).collect();
    let taken_days: Vec<&NaiveDate> = taken.iter().filter(|d| bp.contains_key(*d)).collect();
    if missed_days.len() < thresholds.min_days_per_group || taken_days.len() < thresholds.min_days_per_group {
        return None;
    }

    let delta = mean_over(&bp, missed_days)? - mean_over(&bp, taken_days)?;
    if delta < thresholds.significant_difference {
        return None;
    }

    Some(
        CorrelationInsight::new(
            InsightType::Negative,
            Confidence::Medium,
            "Missing your morning dose may raise blood pressure",
            format!(
                "On days you missed your morning dose, your blood pressure was about {:.0} mmHg higher. \
                 Missing it could have the same effect again.",
                delta
            ),
        )
        .with_metric("Same-day difference", delta, "mmHg"),
    )
}

/// Same-day BP on days with a meal the classifier flags against other meal days
fn salty_meals(
    readings: &[BpReading],
    entries: &[DietEntry],
    classifier: &dyn SodiumClassifier,
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    let mut salty = BTreeSet::new();
    let mut all = BTreeSet::new();
    for e in entries {
        let day = day_key(&e.eaten_at);
        all.insert(day);
        if classifier.is_high_sodium(&e.text()) {
            salty.insert(day);
        }
    }
    let other: BTreeSet<NaiveDate> = all.difference(&salty).copied().collect();

    let bp = daily_bp(readings);
    let salty_days: Vec<&NaiveDate> = salty.iter().filter(|d| bp.contains_key(*d)).collect();
    let other_days: Vec<&NaiveDate> = other.iter().filter(|d| bp.contains_key(*d)).collect();
    if salty_days.len() < thresholds.min_days_per_group || other_days.len() < thresholds.min_days_per_group {
        return None;
    }

    let delta = mean_over(&bp, salty_days)? - mean_over(&bp, other_days)?;
    if delta < thresholds.significant_difference {
        return None;
    }

    Some(
        CorrelationInsight::new(
            InsightType::Negative,
            Confidence::Low,
            "Salty meals may be raising your blood pressure",
            format!(
                "Days with meals that look high in sodium show blood pressure about {:.0} mmHg higher. \
                 Cutting back on salt may help.",
                delta
            ),
        )
        .with_metric("Same-day difference", delta, "mmHg"),
    )
}

fn trend_projection(readings: &[BpReading], thresholds: &Thresholds) -> Option<CorrelationInsight> {
    let trend = bp_trend(readings, thresholds)?;
    let change = trend.projected_change_30_days;
    let insight = match trend.direction {
        TrendDirection::Stable => return None,
        TrendDirection::Worsening => CorrelationInsight::new(
            InsightType::Negative,
            trend.confidence,
            "Blood pressure could keep rising",
            format!(
                "If the current trend continues, your systolic pressure could rise by about {:.0} mmHg over the next 30 days.",
                change
            ),
        ),
        TrendDirection::Improving => CorrelationInsight::new(
            InsightType::Positive,
            trend.confidence,
            "Blood pressure could keep falling",
            format!(
                "If the current trend continues, your systolic pressure could drop by about {:.0} mmHg over the next 30 days.",
                -change
            ),
        ),
    };
    Some(insight.with_metric("30-day projection", change, "mmHg"))
}
