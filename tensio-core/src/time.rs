//! Calendar-day and time-of-day helpers
//!
//! Days are UTC calendar days, matching ISO-8601 date truncation of the
//! timestamp. Callers that want local days should shift timestamps first.

use crate::RecordError;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar day an observation belongs to
pub fn day_key(at: &DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Fractional days elapsed from `from` to `to`
pub fn elapsed_days(from: &DateTime<Utc>, to: &DateTime<Utc>) -> f64 {
    (*to - *from).num_milliseconds() as f64 / 86_400_000.0
}

/// Parse an RFC 3339 timestamp
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RecordError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RecordError::InvalidTimestamp(format!("'{}': {}", s, e)))
}

/// Coarse part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 05:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 to 04:59
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn of(at: &DateTime<Utc>) -> Self {
        Self::from_hour(at.hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}
