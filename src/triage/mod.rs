//! Triage: crisis-first matching of a symptom selection against the
//! condition catalog.

pub mod crisis;
pub mod engine;
pub mod types;

pub use crisis::{crisis_resources, CrisisResources};
pub use engine::{evaluate, MAX_RESULTS, MIN_MATCH_RATE};
pub use types::{ConditionMatch, TriageOutcome};
