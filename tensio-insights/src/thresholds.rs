//! Decision thresholds for the insight engine
//!
//! Every sample-size minimum and significance cut-off used by the analyses
//! lives here. The defaults are the values the product ships with.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Days present in both series before a correlation is attempted
    pub min_common_days: usize,
    pub min_bp_readings: usize,
    pub min_exercise_entries: usize,
    pub min_diet_entries: usize,
    pub min_medication_doses: usize,
    /// Days required on each side of a two-group comparison
    pub min_days_per_group: usize,
    pub min_trend_readings: usize,
    pub medium_confidence_readings: usize,
    pub high_confidence_readings: usize,

    /// mmHg
    pub significant_difference: f64,
    /// mmHg
    pub large_difference: f64,

    /// |r| at which a correlation is reported
    pub moderate_correlation: f64,
    /// |r| at which a correlation is reported with high confidence
    pub strong_correlation: f64,

    /// Percent of scheduled doses taken
    pub adherence_target: f64,

    /// mmHg per week separating a stable trend from a moving one
    pub trend_band: f64,
    pub medium_confidence_r_squared: f64,
    pub high_confidence_r_squared: f64,

    pub post_exercise_window_hours: f64,
    /// Multiplier on the rest-day effect for the week-without-exercise projection
    pub rest_day_projection_factor: f64,

    /// Daily sodium total above which a day counts as high-sodium
    pub high_sodium_day_mg: f64,
    /// Entries carrying `sodium_mg` before the next-day analysis runs
    pub min_sodium_entries: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_common_days: 3,
            min_bp_readings: 5,
            min_exercise_entries: 3,
            min_diet_entries: 3,
            min_medication_doses: 5,
            min_days_per_group: 2,
            min_trend_readings: 5,
            medium_confidence_readings: 7,
            high_confidence_readings: 14,
            significant_difference: 5.0,
            large_difference: 10.0,
            moderate_correlation: 0.3,
            strong_correlation: 0.6,
            adherence_target: 80.0,
            trend_band: 2.0,
            medium_confidence_r_squared: 0.4,
            high_confidence_r_squared: 0.7,
            post_exercise_window_hours: 4.0,
            rest_day_projection_factor: 1.5,
            high_sodium_day_mg: 2300.0,
            min_sodium_entries: 3,
        }
    }
}

impl Thresholds {
    /// Name of the first real-valued threshold that is negative or not finite
    pub fn invalid_field(&self) -> Option<&'static str> {
        let fields = [
            ("significant_difference", self.significant_difference),
            ("large_difference", self.large_difference),
            ("moderate_correlation", self.moderate_correlation),
            ("strong_correlation", self.strong_correlation),
            ("adherence_target", self.adherence_target),
            ("trend_band", self.trend_band),
            ("medium_confidence_r_squared", self.medium_confidence_r_squared),
            ("high_confidence_r_squared", self.high_confidence_r_squared),
            ("post_exercise_window_hours", self.post_exercise_window_hours),
            ("rest_day_projection_factor", self.rest_day_projection_factor),
            ("high_sodium_day_mg", self.high_sodium_day_mg),
        ];
        fields
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
            .map(|(name, _)| name)
    }
}
