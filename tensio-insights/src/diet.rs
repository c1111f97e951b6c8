//! Diet and blood pressure

use crate::buckets::{daily_bp, daily_meal_count, mean_over, paired, DailySeries};
use crate::insight::{correlation_confidence, Confidence, CorrelationInsight, InsightType};
use crate::thresholds::Thresholds;
use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use tensio_core::time::day_key;
use tensio_core::{BpReading, DietEntry, MealType, TimeOfDay};
use tensio_stats::pearson_correlation;
use tracing::debug;

/// At most one insight relating diet to blood pressure.
///
/// Findings are tried in order: meal-count correlation, meal-type spread,
/// morning/evening meal timing, next-day sodium impact.
pub fn diet_correlation(
    readings: &[BpReading],
    entries: &[DietEntry],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    if readings.len() < thresholds.min_bp_readings || entries.len() < thresholds.min_diet_entries {
        debug!(readings = readings.len(), entries = entries.len(), "diet correlation: too little data");
        return None;
    }

    let bp = daily_bp(readings);
    let meals = daily_meal_count(entries);
    let (bp_values, meal_values) = paired(&bp, &meals);
    if bp_values.len() < thresholds.min_common_days {
        debug!(common_days = bp_values.len(), "diet correlation: too few common days");
        return None;
    }

    let r = pearson_correlation(&meal_values, &bp_values);
    if r.abs() >= thresholds.moderate_correlation {
        let confidence = correlation_confidence(r, thresholds.strong_correlation);
        let insight = if r > 0.0 {
            CorrelationInsight::new(
                InsightType::Negative,
                confidence,
                "More meals, higher blood pressure",
                format!("Days with more logged meals tend to have higher blood pressure (r = {:.2}).", r),
            )
        } else {
            CorrelationInsight::new(
                InsightType::Positive,
                confidence,
                "Regular meals, lower blood pressure",
                format!("Days with more logged meals tend to have lower blood pressure (r = {:.2}).", r),
            )
        };
        return Some(insight.with_metric("Correlation", r, "r"));
    }

    meal_type_spread(&bp, entries, thresholds)
        .or_else(|| meal_timing(&bp, entries, thresholds))
        .or_else(|| sodium_next_day_impact(readings, entries, thresholds))
}

/// Highest and lowest mean daily BP across days containing each meal type
fn meal_type_spread(bp: &DailySeries, entries: &[DietEntry], thresholds: &Thresholds) -> Option<CorrelationInsight> {
    let mut days_by_type: BTreeMap<MealType, BTreeSet<NaiveDate>> = BTreeMap::new();
    for e in entries {
        days_by_type.entry(e.meal_type).or_default().insert(day_key(&e.eaten_at));
    }

    let means: Vec<(MealType, f64)> = days_by_type
        .iter()
        .filter_map(|(meal, days)| mean_over(bp, days).map(|m| (*meal, m)))
        .collect();
    if means.len() < 2 {
        return None;
    }

    let (high_type, high) = means.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1))?;
    let (low_type, low) = means.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1))?;
    let spread = high - low;
    if spread < thresholds.significant_difference {
        return None;
    }

    Some(
        CorrelationInsight::new(
            InsightType::Neutral,
            Confidence::Medium,
            "Blood pressure varies by meal type",
            format!(
                "Days with a logged {} average {:.0} mmHg higher than days with a logged {}.",
                high_type.as_str(),
                spread,
                low_type.as_str()
            ),
        )
        .with_metric("Meal-type spread", spread, "mmHg"),
    )
}

/// Days with morning meals against days with evening meals
fn meal_timing(bp: &DailySeries, entries: &[DietEntry], thresholds: &Thresholds) -> Option<CorrelationInsight> {
    let mut morning = BTreeSet::new();
    let mut evening = BTreeSet::new();
    for e in entries {
        match TimeOfDay::of(&e.eaten_at) {
            TimeOfDay::Morning => morning.insert(day_key(&e.eaten_at)),
            TimeOfDay::Evening => evening.insert(day_key(&e.eaten_at)),
            TimeOfDay::Afternoon => false,
        };
    }

    if morning.len() < thresholds.min_days_per_group || evening.len() < thresholds.min_days_per_group {
        return None;
    }

    let delta = mean_over(bp, &evening)? - mean_over(bp, &morning)?;
    if delta.abs() < thresholds.significant_difference {
        return None;
    }

    let insight = if delta > 0.0 {
        CorrelationInsight::new(
            InsightType::Negative,
            Confidence::Low,
            "Late meals linked to higher blood pressure",
            format!("Days with evening meals average {:.0} mmHg higher than days with morning meals.", delta),
        )
    } else {
        CorrelationInsight::new(
            InsightType::Neutral,
            Confidence::Low,
            "Morning meals linked to higher blood pressure",
            format!("Days with morning meals average {:.0} mmHg higher than days with evening meals.", -delta),
        )
    };
    Some(insight.with_metric("Evening minus morning", delta, "mmHg"))
}

/// BP on the day after a high-sodium day against the day after a normal one.
///
/// Runs only when `min_sodium_entries` entries carry `sodium_mg`; without
/// that field it always returns `None`.
pub fn sodium_next_day_impact(
    readings: &[BpReading],
    entries: &[DietEntry],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    let measured: Vec<(&DietEntry, f64)> = entries
        .iter()
        .filter_map(|e| e.sodium_mg.map(|mg| (e, mg)))
        .collect();
    if measured.len() < thresholds.min_sodium_entries {
        debug!(measured = measured.len(), "sodium impact: sodium_mg not available");
        return None;
    }

    let mut daily_sodium = DailySeries::new();
    for (e, mg) in &measured {
        *daily_sodium.entry(day_key(&e.eaten_at)).or_default() += mg;
    }

    let bp = daily_bp(readings);
    let mut after_high = Vec::new();
    let mut after_normal = Vec::new();
    for (day, total) in &daily_sodium {
        let Some(next) = day.checked_add_days(Days::new(1)) else {
            continue;
        };
        if bp.contains_key(&next) {
            if *total > thresholds.high_sodium_day_mg {
                after_high.push(next);
            } else {
                after_normal.push(next);
            }
        }
    }

    if after_high.len() < thresholds.min_days_per_group || after_normal.len() < thresholds.min_days_per_group {
        return None;
    }

    let delta = mean_over(&bp, &after_high)? - mean_over(&bp, &after_normal)?;
    if delta < thresholds.significant_difference {
        return None;
    }

    Some(
        CorrelationInsight::new(
            InsightType::Negative,
            Confidence::Medium,
            "High-sodium days raise next-day blood pressure",
            format!(
                "The day after eating more than {:.0} mg of sodium, your blood pressure averages {:.0} mmHg higher.",
                thresholds.high_sodium_day_mg, delta
            ),
        )
        .with_metric("Next-day difference", delta, "mmHg"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::fixtures::*;

    fn t() -> Thresholds {
        Thresholds::default()
    }

    fn meal(day: i64, hour: i64, meal_type: MealType) -> DietEntry {
        DietEntry::new(at(day, hour), meal_type, "meal")
    }

    #[test]
    fn test_needs_minimums() {
        let readings: Vec<_> = (0..5).map(|d| reading(d, 8, 120.0, 80.0)).collect();
        let entries = vec![meal(0, 8, MealType::Breakfast), meal(1, 8, MealType::Breakfast)];
        assert!(diet_correlation(&readings, &entries, &t()).is_none());
    }

    #[test]
    fn test_meal_count_correlation() {
        let readings: Vec<_> = (0..5).map(|d| reading(d, 8, 120.0 + 3.0 * d as f64, 80.0)).collect();
        let mut entries = Vec::new();
        for d in 0..5 {
            for _ in 0..=d {
                entries.push(meal(d, 13, MealType::Lunch));
            }
        }
        let insight = diet_correlation(&readings, &entries, &t()).unwrap();
        assert_eq!(insight.insight_type, InsightType::Negative);
        assert_eq!(insight.confidence, Confidence::High);
    }

    #[test]
    fn test_meal_type_spread() {
        // one meal a day so the count correlation is undefined
        let readings: Vec<_> = (0..6)
            .map(|d| if d < 3 { reading(d, 8, 120.0, 80.0) } else { reading(d, 8, 150.0, 90.0) })
            .collect();
        let entries: Vec<_> = (0..6)
            .map(|d| if d < 3 { meal(d, 13, MealType::Lunch) } else { meal(d, 13, MealType::Snack) })
            .collect();
        let insight = diet_correlation(&readings, &entries, &t()).unwrap();
        assert_eq!(insight.title, "Blood pressure varies by meal type");
        assert!(insight.description.contains("snack"));
    }

    #[test]
    fn test_sodium_path_is_inert_without_field() {
        let readings: Vec<_> = (0..6).map(|d| reading(d, 8, 120.0, 80.0)).collect();
        let entries: Vec<_> = (0..6).map(|d| meal(d, 13, MealType::Lunch)).collect();
        assert!(sodium_next_day_impact(&readings, &entries, &t()).is_none());
        assert!(diet_correlation(&readings, &entries, &t()).is_none());
    }

    #[test]
    fn test_sodium_next_day() {
        // high sodium on days 0 and 2, normal on 4 and 6
        let readings: Vec<_> = (0..8)
            .map(|d| if d == 1 || d == 3 { reading(d, 8, 150.0, 90.0) } else { reading(d, 8, 120.0, 80.0) })
            .collect();
        let entries: Vec<_> = [(0, 3000.0), (2, 3200.0), (4, 1200.0), (6, 1500.0)]
            .iter()
            .map(|&(d, mg)| {
                let mut e = meal(d, 13, MealType::Dinner);
                e.sodium_mg = Some(mg);
                e
            })
            .collect();
        let insight = sodium_next_day_impact(&readings, &entries, &t()).unwrap();
        assert_eq!(insight.insight_type, InsightType::Negative);
        assert!(insight.metric.unwrap().value > 10.0);
    }

    /// Two readings and one snack a day; `evening_days` get their snack at 19:00
    fn timing_fixture(high_days: &[i64], evening_days: &[i64], high_dia: f64) -> (Vec<BpReading>, Vec<DietEntry>) {
        let mut readings = Vec::new();
        let mut entries = Vec::new();
        for d in 0..4 {
            // composite = diastolic + 10
            let (sys, dia) = if high_days.contains(&d) { (high_dia + 30.0, high_dia) } else { (120.0, 90.0) };
            readings.push(reading(d, 8, sys, dia));
            readings.push(reading(d, 20, sys, dia));
            let hour = if evening_days.contains(&d) { 19 } else { 8 };
            entries.push(meal(d, hour, MealType::Snack));
        }
        (readings, entries)
    }

    #[test]
    fn test_late_meals_run_higher() {
        let (readings, entries) = timing_fixture(&[2, 3], &[2, 3], 100.0);
        let insight = diet_correlation(&readings, &entries, &t()).unwrap();
        assert_eq!(insight.title, "Late meals linked to higher blood pressure");
        assert_eq!(insight.insight_type, InsightType::Negative);
        assert_eq!(insight.confidence, Confidence::Low);
        assert_eq!(insight.metric.unwrap().value, 10.0);
    }

    #[test]
    fn test_morning_meals_run_higher() {
        let (readings, entries) = timing_fixture(&[0, 1], &[2, 3], 100.0);
        let insight = diet_correlation(&readings, &entries, &t()).unwrap();
        assert_eq!(insight.title, "Morning meals linked to higher blood pressure");
        assert_eq!(insight.insight_type, InsightType::Neutral);
        assert_eq!(insight.metric.unwrap().value, -10.0);
    }

    #[test]
    fn test_meal_timing_needs_days_in_each_group() {
        // one morning day against three evening days
        let (readings, entries) = timing_fixture(&[1, 2, 3], &[1, 2, 3], 100.0);
        let bp = daily_bp(&readings);
        assert!(meal_timing(&bp, &entries, &t()).is_none());
        assert!(diet_correlation(&readings, &entries, &t()).is_none());
    }

    #[test]
    fn test_meal_timing_edge() {
        // exactly the significant difference is reported
        let (readings, entries) = timing_fixture(&[2, 3], &[2, 3], 95.0);
        let bp = daily_bp(&readings);
        let insight = meal_timing(&bp, &entries, &t()).unwrap();
        assert_eq!(insight.metric.unwrap().value, 5.0);

        let (readings, entries) = timing_fixture(&[2, 3], &[2, 3], 94.0);
        assert!(meal_timing(&daily_bp(&readings), &entries, &t()).is_none());
    }
}
