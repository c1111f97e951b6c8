//! Observation records handed to the analytics engine
//!
//! Each record carries its own timestamp field. The engine assumes records
//! are already validated; `validate()` exists for the layer that decodes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("field '{field}' is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("duration_minutes must be non-negative, got {0}")]
    NegativeDuration(f64),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

fn require_finite(field: &'static str, value: f64) -> Result<(), RecordError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RecordError::NonFinite { field, value })
    }
}

/// A single blood-pressure measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpReading {
    #[serde(alias = "timestamp", alias = "reading_time")]
    pub taken_at: DateTime<Utc>,
    pub systolic: f64,
    pub diastolic: f64,
    pub pulse: f64,
}

impl BpReading {
    pub fn new(taken_at: DateTime<Utc>, systolic: f64, diastolic: f64, pulse: f64) -> Self {
        Self { taken_at, systolic, diastolic, pulse }
    }

    /// Mean-arterial-pressure-like composite: `diastolic + (systolic - diastolic) / 3`
    pub fn composite(&self) -> f64 {
        self.diastolic + (self.systolic - self.diastolic) / 3.0
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        require_finite("systolic", self.systolic)?;
        require_finite("diastolic", self.diastolic)?;
        require_finite("pulse", self.pulse)
    }
}

/// A logged workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    #[serde(alias = "timestamp", alias = "exercise_time")]
    pub performed_at: DateTime<Utc>,
    pub duration_minutes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

impl ExerciseSession {
    pub fn new(performed_at: DateTime<Utc>, duration_minutes: f64) -> Self {
        Self { performed_at, duration_minutes, activity: None }
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        require_finite("duration_minutes", self.duration_minutes)?;
        if self.duration_minutes < 0.0 {
            return Err(RecordError::NegativeDuration(self.duration_minutes));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    #[serde(alias = "timestamp", alias = "meal_time")]
    pub eaten_at: DateTime<Utc>,
    pub meal_type: MealType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Measured sodium content. Most data sources do not provide it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,
}

impl DietEntry {
    pub fn new(eaten_at: DateTime<Utc>, meal_type: MealType, description: impl Into<String>) -> Self {
        Self {
            eaten_at,
            meal_type,
            description: description.into(),
            notes: None,
            sodium_mg: None,
        }
    }

    /// Description and notes joined for free-text matching
    pub fn text(&self) -> String {
        match &self.notes {
            Some(notes) if !notes.is_empty() => format!("{} {}", self.description, notes),
            _ => self.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        match self.sodium_mg {
            Some(mg) => require_finite("sodium_mg", mg),
            None => Ok(()),
        }
    }
}

/// A scheduled medication dose and whether it was taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationDose {
    #[serde(alias = "timestamp", alias = "scheduled_time")]
    pub scheduled_at: DateTime<Utc>,
    pub taken: bool,
}

impl MedicationDose {
    pub fn new(scheduled_at: DateTime<Utc>, taken: bool) -> Self {
        Self { scheduled_at, taken }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_composite() {
        let r = BpReading::new(ts(), 120.0, 90.0, 70.0);
        assert!((r.composite() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_reading_rejects_nan() {
        let r = BpReading::new(ts(), f64::NAN, 80.0, 60.0);
        assert!(matches!(r.validate(), Err(RecordError::NonFinite { field: "systolic", .. })));
    }

    #[test]
    fn test_negative_duration() {
        let s = ExerciseSession::new(ts(), -5.0);
        assert_eq!(s.validate(), Err(RecordError::NegativeDuration(-5.0)));
    }

    #[test]
    fn test_diet_text_joins_notes() {
        let mut entry = DietEntry::new(ts(), MealType::Dinner, "ramen");
        assert_eq!(entry.text(), "ramen");
        entry.notes = Some("extra soy sauce".to_string());
        assert_eq!(entry.text(), "ramen extra soy sauce");
    }

    #[test]
    fn test_deserialize_with_alias() {
        let json = r#"{"timestamp":"2025-03-01T08:00:00Z","systolic":120,"diastolic":80,"pulse":65}"#;
        let r: BpReading = serde_json::from_str(json).unwrap();
        assert_eq!(r.taken_at, ts());
        assert_eq!(r.systolic, 120.0);
    }
}
