//! Static catalog entries and the small value types shared by the
//! engine, the intake flow and the API.

pub mod condition;
pub mod enums;
pub mod symptom;

use thiserror::Error;

pub use condition::Condition;
pub use enums::{DurationBucket, IntakeStep, SymptomCategory};
pub use symptom::{Severity, Symptom, SymptomAnnotation};

/// Errors from parsing or validating model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Severity must be between {min} and {max}, got {value}")]
    SeverityOutOfRange { value: u8, min: u8, max: u8 },
}
