//! Medication adherence and blood pressure

use crate::buckets::{daily_adherence, daily_bp, paired};
use crate::insight::{correlation_confidence, Confidence, CorrelationInsight, InsightType};
use crate::thresholds::Thresholds;
use tensio_core::{BpReading, MedicationDose};
use tensio_stats::{mean, pearson_correlation};
use tracing::debug;

/// Correlate daily adherence with daily BP. When no correlation is reported,
/// an average adherence below `adherence_target` still produces a warning.
pub fn medication_correlation(
    readings: &[BpReading],
    doses: &[MedicationDose],
    thresholds: &Thresholds,
) -> Option<CorrelationInsight> {
    if readings.len() < thresholds.min_bp_readings || doses.len() < thresholds.min_medication_doses {
        debug!(readings = readings.len(), doses = doses.len(), "medication correlation: too little data");
        return None;
    }

    let bp = daily_bp(readings);
    let adherence = daily_adherence(doses);
    let (bp_values, adherence_values) = paired(&bp, &adherence);

    if bp_values.len() >= thresholds.min_common_days {
        let r = pearson_correlation(&adherence_values, &bp_values);
        if r.abs() >= thresholds.moderate_correlation {
            let confidence = correlation_confidence(r, thresholds.strong_correlation);
            let insight = if r < 0.0 {
                CorrelationInsight::new(
                    InsightType::Positive,
                    confidence,
                    "Your medication is working",
                    format!("Days when you take all your doses show lower blood pressure (r = {:.2}).", r),
                )
            } else {
                CorrelationInsight::new(
                    InsightType::Neutral,
                    Confidence::Low,
                    "Medication and blood pressure rise together",
                    format!(
                        "Days with more doses taken show slightly higher blood pressure (r = {:.2}). \
                         This can happen when doses are taken in response to high readings.",
                        r
                    ),
                )
            };
            return Some(insight.with_metric("Correlation", r, "r"));
        }
    }

    let daily: Vec<f64> = adherence.values().copied().collect();
    let average = mean(&daily);
    if average < thresholds.adherence_target {
        return Some(
            CorrelationInsight::new(
                InsightType::Negative,
                Confidence::High,
                "Low medication adherence",
                format!(
                    "You took {:.0}% of your scheduled doses. Aim for at least {:.0}% so your medication can work consistently.",
                    average, thresholds.adherence_target
                ),
            )
            .with_metric("Adherence", average, "%"),
        );
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::fixtures::*;

    fn t() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn test_needs_five_doses() {
        let readings: Vec<_> = (0..6).map(|d| reading(d, 8, 120.0, 80.0)).collect();
        let doses: Vec<_> = (0..4).map(|d| MedicationDose::new(at(d, 8), false)).collect();
        assert!(medication_correlation(&readings, &doses, &t()).is_none());
    }

    #[test]
    fn test_low_adherence_warning() {
        let readings: Vec<_> = (0..6).map(|d| reading(d, 8, 120.0, 80.0)).collect();
        let doses: Vec<_> = (0..6).map(|d| MedicationDose::new(at(d, 7), d < 2)).collect();
        let insight = medication_correlation(&readings, &doses, &t()).unwrap();
        assert_eq!(insight.insight_type, InsightType::Negative);
        assert_eq!(insight.title, "Low medication adherence");
        assert!((insight.metric.unwrap().value - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_adherence_correlation() {
        let readings: Vec<_> = (0..6)
            .map(|d| if d % 2 == 0 { reading(d, 8, 120.0, 80.0) } else { reading(d, 8, 145.0, 92.0) })
            .collect();
        let doses: Vec<_> = (0..6).map(|d| MedicationDose::new(at(d, 7), d % 2 == 0)).collect();
        let insight = medication_correlation(&readings, &doses, &t()).unwrap();
        assert_eq!(insight.insight_type, InsightType::Positive);
        assert_eq!(insight.confidence, Confidence::High);
    }

    #[test]
    fn test_good_adherence_is_silent() {
        let readings: Vec<_> = (0..6).map(|d| reading(d, 8, 120.0, 80.0)).collect();
        let doses: Vec<_> = (0..6).map(|d| MedicationDose::new(at(d, 7), true)).collect();
        assert!(medication_correlation(&readings, &doses, &t()).is_none());
    }

    #[test]
    fn test_doses_on_high_days() {
        // doses taken only on the high days
        let readings: Vec<_> = (0..6)
            .map(|d| if d % 2 == 0 { reading(d, 8, 120.0, 80.0) } else { reading(d, 8, 145.0, 92.0) })
            .collect();
        let doses: Vec<_> = (0..6).map(|d| MedicationDose::new(at(d, 7), d % 2 == 1)).collect();
        let insight = medication_correlation(&readings, &doses, &t()).unwrap();
        assert_eq!(insight.title, "Medication and blood pressure rise together");
        assert_eq!(insight.insight_type, InsightType::Neutral);
        assert_eq!(insight.confidence, Confidence::Low);
        assert!(insight.metric.unwrap().value > 0.99);
    }
}
