//! Tensio Core - Fundamental types
//!
//! This crate provides the core types used throughout Tensio:
//! - Observation records: BP readings, exercise, diet, medication doses
//! - Calendar-day and time-of-day helpers
//! - `TensioError`: Structured errors for tool callers

mod error;
mod records;
pub mod time;

pub use error::{codes, ErrorContext, Severity, TensioError};
pub use records::{BpReading, DietEntry, ExerciseSession, MealType, MedicationDose, RecordError};
pub use time::TimeOfDay;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{
        BpReading, DietEntry, ExerciseSession, MealType, MedicationDose, Severity, TensioError,
        TimeOfDay,
    };
}
