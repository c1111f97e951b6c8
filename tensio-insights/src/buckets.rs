//! Calendar-day aggregation of the observation series

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tensio_core::time::day_key;
use tensio_core::{BpReading, DietEntry, ExerciseSession, MedicationDose};
use tensio_stats::mean;

pub type DailySeries = BTreeMap<NaiveDate, f64>;

/// Daily mean of the reading composite
pub fn daily_bp(readings: &[BpReading]) -> DailySeries {
    let mut days: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for r in readings {
        days.entry(day_key(&r.taken_at)).or_default().push(r.composite());
    }
    days.into_iter().map(|(day, values)| (day, mean(&values))).collect()
}

/// Daily total exercise minutes
pub fn daily_exercise_minutes(sessions: &[ExerciseSession]) -> DailySeries {
    let mut days = DailySeries::new();
    for s in sessions {
        *days.entry(day_key(&s.performed_at)).or_default() += s.duration_minutes;
    }
    days
}

/// Daily number of logged meals
pub fn daily_meal_count(entries: &[DietEntry]) -> DailySeries {
    let mut days = DailySeries::new();
    for e in entries {
        *days.entry(day_key(&e.eaten_at)).or_default() += 1.0;
    }
    days
}

/// Daily percentage of scheduled doses that were taken
pub fn daily_adherence(doses: &[MedicationDose]) -> DailySeries {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for d in doses {
        let (taken, total) = days.entry(day_key(&d.scheduled_at)).or_default();
        if d.taken {
            *taken += 1;
        }
        *total += 1;
    }
    days.into_iter()
        .map(|(day, (taken, total))| (day, taken as f64 / total as f64 * 100.0))
        .collect()
}

/// Values of `a` and `b` on the days both series cover, in date order
pub fn paired(a: &DailySeries, b: &DailySeries) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .filter_map(|(day, &va)| b.get(day).map(|&vb| (va, vb)))
        .unzip()
}

/// Mean of `series` over the given days; `None` when no day is covered
pub fn mean_over<'a>(series: &DailySeries, days: impl IntoIterator<Item = &'a NaiveDate>) -> Option<f64> {
    let values: Vec<f64> = days.into_iter().filter_map(|d| series.get(d).copied()).collect();
    (!values.is_empty()).then(|| mean(&values))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use tensio_core::MealType;

    #[test]
    fn test_daily_bp_uses_composite() {
        let days = daily_bp(&[reading(0, 8, 120.0, 90.0), reading(0, 20, 150.0, 90.0)]);
        assert_eq!(days.len(), 1);
        // composites 100 and 110
        assert!((days.values().next().unwrap() - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_totals() {
        let sessions = [
            ExerciseSession::new(at(0, 7), 20.0),
            ExerciseSession::new(at(0, 18), 25.0),
            ExerciseSession::new(at(2, 7), 30.0),
        ];
        let minutes = daily_exercise_minutes(&sessions);
        assert_eq!(minutes.values().copied().collect::<Vec<_>>(), vec![45.0, 30.0]);

        let meals = daily_meal_count(&[
            DietEntry::new(at(0, 8), MealType::Breakfast, "oats"),
            DietEntry::new(at(0, 13), MealType::Lunch, "soup"),
        ]);
        assert_eq!(meals.values().copied().collect::<Vec<_>>(), vec![2.0]);
    }

    #[test]
    fn test_daily_adherence() {
        let doses = [
            MedicationDose::new(at(0, 8), true),
            MedicationDose::new(at(0, 20), false),
            MedicationDose::new(at(1, 8), true),
        ];
        let days = daily_adherence(&doses);
        assert_eq!(days.values().copied().collect::<Vec<_>>(), vec![50.0, 100.0]);
    }

    #[test]
    fn test_paired_keeps_common_days() {
        let bp = daily_bp(&[reading(0, 8, 120.0, 90.0), reading(1, 8, 120.0, 90.0), reading(2, 8, 120.0, 90.0)]);
        let minutes = daily_exercise_minutes(&[ExerciseSession::new(at(1, 7), 10.0), ExerciseSession::new(at(5, 7), 10.0)]);
        let (a, b) = paired(&bp, &minutes);
        assert_eq!(a.len(), 1);
        assert_eq!(b, vec![10.0]);
    }
}
