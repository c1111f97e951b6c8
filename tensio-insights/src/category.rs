//! ACC/AHA blood-pressure categories

use serde::{Deserialize, Serialize};
use tensio_core::BpReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    HypertensiveCrisis,
}

impl BpCategory {
    /// Highest band either value falls into
    pub fn classify(systolic: f64, diastolic: f64) -> Self {
        if systolic > 180.0 || diastolic > 120.0 {
            BpCategory::HypertensiveCrisis
        } else if systolic >= 140.0 || diastolic >= 90.0 {
            BpCategory::Stage2
        } else if systolic >= 130.0 || diastolic >= 80.0 {
            BpCategory::Stage1
        } else if systolic >= 120.0 {
            BpCategory::Elevated
        } else {
            BpCategory::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BpCategory::Normal => "normal",
            BpCategory::Elevated => "elevated",
            BpCategory::Stage1 => "stage 1 hypertension",
            BpCategory::Stage2 => "stage 2 hypertension",
            BpCategory::HypertensiveCrisis => "hypertensive crisis",
        }
    }
}

pub fn classify_reading(reading: &BpReading) -> BpCategory {
    BpCategory::classify(reading.systolic, reading.diastolic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(BpCategory::classify(115.0, 75.0), BpCategory::Normal);
        assert_eq!(BpCategory::classify(125.0, 75.0), BpCategory::Elevated);
        assert_eq!(BpCategory::classify(125.0, 82.0), BpCategory::Stage1);
        assert_eq!(BpCategory::classify(142.0, 70.0), BpCategory::Stage2);
        assert_eq!(BpCategory::classify(185.0, 100.0), BpCategory::HypertensiveCrisis);
        assert_eq!(BpCategory::classify(150.0, 125.0), BpCategory::HypertensiveCrisis);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(BpCategory::classify(120.0, 79.0), BpCategory::Elevated);
        assert_eq!(BpCategory::classify(130.0, 79.0), BpCategory::Stage1);
        assert_eq!(BpCategory::classify(139.0, 90.0), BpCategory::Stage2);
        assert_eq!(BpCategory::classify(180.0, 120.0), BpCategory::Stage2);
    }
}
