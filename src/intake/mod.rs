//! Intake flow: the staged Search → Refine → Analyze interaction that
//! builds a symptom selection and hands it to the triage engine.

pub mod flow;
pub mod search;
pub mod selection;

pub use flow::{BackOutcome, BlockReason, FlowError, IntakeFlow, IntakeState, RefineItem, StepProgress, Transition};
pub use selection::Selection;
