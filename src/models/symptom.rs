use serde::{Deserialize, Serialize};

use super::enums::{DurationBucket, SymptomCategory};
use super::ModelError;

/// One entry of the symptom taxonomy. Defined at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub id: &'static str,
    pub label: &'static str,
    pub category: SymptomCategory,
    /// Selecting a red-flag symptom routes the whole intake to crisis.
    pub red_flag: bool,
}

impl Symptom {
    pub const fn new(id: &'static str, label: &'static str, category: SymptomCategory) -> Self {
        Self {
            id,
            label,
            category,
            red_flag: false,
        }
    }

    pub const fn red_flag(id: &'static str, label: &'static str, category: SymptomCategory) -> Self {
        Self {
            id,
            label,
            category,
            red_flag: true,
        }
    }
}

/// Self-reported severity on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    /// Slider position before the user touches it.
    pub const DEFAULT: Severity = Severity(5);

    pub fn new(value: u8) -> Result<Self, ModelError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::SeverityOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Slider legend: Mild / Moderate / Severe.
    pub fn band(&self) -> &'static str {
        match self.0 {
            1..=3 => "mild",
            4..=7 => "moderate",
            _ => "severe",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> u8 {
        s.0
    }
}

/// Refine-stage detail for one selected symptom.
///
/// Captured for display and for the caller to store; scoring ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnnotation {
    pub severity: Option<Severity>,
    pub duration: Option<DurationBucket>,
}

impl SymptomAnnotation {
    pub fn is_empty(&self) -> bool {
        self.severity.is_none() && self.duration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_accepts_scale_bounds() {
        assert_eq!(Severity::new(1).unwrap().value(), 1);
        assert_eq!(Severity::new(10).unwrap().value(), 10);
    }

    #[test]
    fn severity_rejects_out_of_range() {
        assert!(matches!(
            Severity::new(0),
            Err(ModelError::SeverityOutOfRange { value: 0, .. })
        ));
        assert!(Severity::new(11).is_err());
    }

    #[test]
    fn severity_deserialize_validates() {
        assert!(serde_json::from_str::<Severity>("7").is_ok());
        assert!(serde_json::from_str::<Severity>("42").is_err());
    }

    #[test]
    fn severity_bands() {
        assert_eq!(Severity::new(2).unwrap().band(), "mild");
        assert_eq!(Severity::DEFAULT.band(), "moderate");
        assert_eq!(Severity::new(9).unwrap().band(), "severe");
    }

    #[test]
    fn empty_annotation() {
        assert!(SymptomAnnotation::default().is_empty());
        let a = SymptomAnnotation {
            severity: Some(Severity::DEFAULT),
            duration: None,
        };
        assert!(!a.is_empty());
    }
}
