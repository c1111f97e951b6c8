//! Insight engine
//!
//! Runs every analysis over one user's data and returns a single ranked,
//! de-duplicated list.

use crate::diet::diet_correlation;
use crate::exercise::exercise_correlation;
use crate::insight::{rank_insights, CorrelationInsight};
use crate::medication::medication_correlation;
use crate::predictive::predictive_insights;
use crate::rest_day::rest_day_impact;
use crate::sodium::{KeywordSodiumClassifier, SodiumClassifier};
use crate::thresholds::Thresholds;
use crate::trend::{bp_trend, trend_insight};
use crate::weekly::{week_over_week, week_over_week_insight};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tensio_core::{BpReading, DietEntry, ExerciseSession, MedicationDose};
use tracing::debug;

/// The four observation series for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthData {
    #[serde(default)]
    pub readings: Vec<BpReading>,
    #[serde(default)]
    pub exercise: Vec<ExerciseSession>,
    #[serde(default)]
    pub diet: Vec<DietEntry>,
    #[serde(default)]
    pub doses: Vec<MedicationDose>,
}

pub struct InsightEngine {
    thresholds: Thresholds,
    classifier: Box<dyn SodiumClassifier>,
}

impl InsightEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            classifier: Box::new(KeywordSodiumClassifier::default()),
        }
    }

    pub fn with_classifier<C: SodiumClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn generate(&self, data: &HealthData, now: DateTime<Utc>) -> Vec<CorrelationInsight> {
        let t = &self.thresholds;

        let (exercise, (diet, medication)) = rayon::join(
            || exercise_correlation(&data.readings, &data.exercise, t),
            || {
                rayon::join(
                    || diet_correlation(&data.readings, &data.diet, t),
                    || medication_correlation(&data.readings, &data.doses, t),
                )
            },
        );

        let mut insights: Vec<CorrelationInsight> = [exercise, diet, medication]
            .into_iter()
            .flatten()
            .collect();

        insights.extend(rest_day_impact(&data.readings, &data.exercise, t));
        insights.extend(bp_trend(&data.readings, t).map(|trend| trend_insight(&trend)));
        insights.extend(week_over_week_insight(
            &week_over_week(&data.readings, &data.exercise, &data.diet, now),
            t,
        ));
        insights.extend(predictive_insights(
            &data.readings,
            &data.exercise,
            &data.diet,
            &data.doses,
            self.classifier.as_ref(),
            t,
        ));

        let mut seen = HashSet::new();
        insights.retain(|i| seen.insert(i.title.clone()));

        debug!(count = insights.len(), "generated insights");
        rank_insights(insights)
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::fixtures::*;
    use crate::insight::InsightType;

    struct Never;

    impl SodiumClassifier for Never {
        fn is_high_sodium(&self, _text: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_empty_data() {
        let engine = InsightEngine::default();
        assert!(engine.generate(&HealthData::default(), at(10, 0)).is_empty());
    }

    #[test]
    fn test_titles_are_unique_and_ranked() {
        let (readings, exercise) = alternating();
        let data = HealthData { readings, exercise, ..Default::default() };
        let insights = InsightEngine::default().generate(&data, at(6, 0));

        let titles: HashSet<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles.len(), insights.len());
        assert!(titles.contains("Blood pressure is lower on exercise days"));
        assert!(titles.contains("Skipping exercise could raise your blood pressure"));

        let first_neutral = insights.iter().position(|i| i.insight_type == InsightType::Neutral);
        let last_positive = insights.iter().rposition(|i| i.insight_type == InsightType::Positive);
        if let (Some(n), Some(p)) = (first_neutral, last_positive) {
            assert!(p < n);
        }
    }

    #[test]
    fn test_custom_classifier() {
        let readings: Vec<_> = (0..4)
            .map(|d| if d < 2 { reading(d, 20, 150.0, 95.0) } else { reading(d, 20, 122.0, 80.0) })
            .collect();
        let diet: Vec<_> = (0..4)
            .map(|d| DietEntry::new(at(d, 13), tensio_core::MealType::Lunch, if d < 2 { "bacon" } else { "salad" }))
            .collect();
        let data = HealthData { readings, diet, ..Default::default() };

        let with_default = InsightEngine::default().generate(&data, at(4, 0));
        assert!(with_default.iter().any(|i| i.title == "Salty meals may be raising your blood pressure"));

        let with_never = InsightEngine::default().with_classifier(Never).generate(&data, at(4, 0));
        assert!(!with_never.iter().any(|i| i.title == "Salty meals may be raising your blood pressure"));
    }
}
