//! Intake state machine.
//!
//! Forward: Search → Refine → Analyze, each step an explicit `advance()`.
//! Backward: Analyze → Refine → Search → exit. Going back keeps every entry;
//! only `reset()` clears the selection.
//!
//! A red flag in the selection skips Refine on the way forward so the
//! crisis screen is never held behind the annotation step.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{category_style, Catalog, CategoryStyle};
use crate::models::{
    DurationBucket, IntakeStep, ModelError, Severity, Symptom, SymptomAnnotation,
};
use crate::triage::{self, TriageOutcome};

use super::selection::Selection;

/// Number of screens in the intake.
pub const TOTAL_STEPS: u8 = 3;

// ═══════════════════════════════════════════
// State and transition results
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeState {
    Search,
    Refine,
    Analyze { outcome: TriageOutcome },
}

impl IntakeState {
    pub fn step(&self) -> IntakeStep {
        match self {
            Self::Search => IntakeStep::Search,
            Self::Refine => IntakeStep::Refine,
            Self::Analyze { .. } => IntakeStep::Analyze,
        }
    }
}

/// Result of a forward request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum Transition {
    Advanced(IntakeStep),
    /// Forward action is disabled; state unchanged.
    Blocked(BlockReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockReason {
    /// Search needs at least one symptom.
    EmptySelection,
    /// Analyze is the last step.
    AlreadyComplete,
}

/// Result of a backward request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum BackOutcome {
    Moved(IntakeStep),
    /// Back from Search leaves the intake; the caller navigates away.
    Exit,
}

/// Progress bar data for the flow chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub current_step: u8,
    pub total_steps: u8,
}

/// One card of the Refine screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineItem {
    pub symptom: Symptom,
    pub style: CategoryStyle,
    pub annotation: SymptomAnnotation,
    /// Slider position: the recorded severity or the untouched default.
    pub slider: Severity,
    pub severity_band: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_label: Option<&'static str>,
}

impl RefineItem {
    fn new(symptom: &Symptom, annotation: SymptomAnnotation) -> Self {
        let slider = annotation.severity.unwrap_or(Severity::DEFAULT);
        Self {
            symptom: symptom.clone(),
            style: category_style(symptom.category),
            annotation,
            slider,
            severity_band: slider.band(),
            duration_label: annotation.duration.map(|d| d.label()),
        }
    }
}

/// A malformed command. State is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    #[error("{action} is only available in the {expected} step (currently {actual})")]
    WrongStep {
        action: &'static str,
        expected: IntakeStep,
        actual: IntakeStep,
    },

    #[error("Symptom {0} is not selected")]
    NotSelected(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

// ═══════════════════════════════════════════
// IntakeFlow
// ═══════════════════════════════════════════

/// One user's intake. Owns its selection exclusively.
#[derive(Debug, Clone)]
pub struct IntakeFlow<'c> {
    catalog: &'c Catalog,
    state: IntakeState,
    selection: Selection,
    /// Last engine result and the (sorted) ids it was computed from.
    last_evaluation: Option<(Vec<&'static str>, TriageOutcome)>,
    evaluations: u32,
}

impl<'c> IntakeFlow<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            state: IntakeState::Search,
            selection: Selection::new(),
            last_evaluation: None,
            evaluations: 0,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn step(&self) -> IntakeStep {
        self.state.step()
    }

    pub fn progress(&self) -> StepProgress {
        StepProgress {
            current_step: self.step().number(),
            total_steps: TOTAL_STEPS,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Outcome shown on the Analyze screen.
    pub fn outcome(&self) -> Option<&TriageOutcome> {
        match &self.state {
            IntakeState::Analyze { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// How many times the engine has run for this intake.
    pub fn evaluation_count(&self) -> u32 {
        self.evaluations
    }

    /// Whether the selection already holds a red-flag symptom.
    pub fn crisis_pending(&self) -> bool {
        self.selection
            .ids()
            .iter()
            .any(|id| self.catalog.is_red_flag(id))
    }

    pub fn can_advance(&self) -> bool {
        match self.state {
            IntakeState::Search => !self.selection.is_empty(),
            IntakeState::Refine => true,
            IntakeState::Analyze { .. } => false,
        }
    }

    // ── Search ──────────────────────────────────────────────

    /// Select or deselect a taxonomy symptom. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, symptom_id: &str) -> Result<bool, FlowError> {
        self.require(IntakeStep::Search, "toggle")?;
        let id = self
            .catalog
            .symptom(symptom_id)
            .map(|s| s.id)
            .ok_or_else(|| FlowError::UnknownSymptom(symptom_id.to_string()))?;
        let selected = self.selection.toggle(id);
        tracing::debug!(selected_count = self.selection.len(), "Intake: selection changed");
        Ok(selected)
    }

    // ── Refine ──────────────────────────────────────────────

    /// Record severity and/or duration for a selected symptom. `None`
    /// fields keep any earlier value.
    pub fn annotate(
        &mut self,
        symptom_id: &str,
        severity: Option<u8>,
        duration: Option<DurationBucket>,
    ) -> Result<(), FlowError> {
        self.require(IntakeStep::Refine, "annotate")?;
        let id = self
            .selection
            .ids()
            .iter()
            .copied()
            .find(|id| *id == symptom_id)
            .ok_or_else(|| FlowError::NotSelected(symptom_id.to_string()))?;
        let severity = severity.map(Severity::new).transpose()?;
        self.selection
            .annotate(id, SymptomAnnotation { severity, duration });
        Ok(())
    }

    /// Every selected symptom exactly once, in selection order.
    pub fn refine_items(&self) -> Vec<RefineItem> {
        self.selection
            .annotated()
            .filter_map(|(id, annotation)| {
                self.catalog
                    .symptom(id)
                    .map(|symptom| RefineItem::new(symptom, annotation))
            })
            .collect()
    }

    // ── Navigation ──────────────────────────────────────────

    pub fn advance(&mut self) -> Transition {
        let next = match self.state {
            IntakeState::Search if self.selection.is_empty() => {
                return Transition::Blocked(BlockReason::EmptySelection);
            }
            IntakeState::Search if self.crisis_pending() => IntakeStep::Analyze,
            IntakeState::Search => IntakeStep::Refine,
            IntakeState::Refine => IntakeStep::Analyze,
            IntakeState::Analyze { .. } => {
                return Transition::Blocked(BlockReason::AlreadyComplete);
            }
        };

        self.state = match next {
            IntakeStep::Analyze => IntakeState::Analyze {
                outcome: self.analyze(),
            },
            _ => IntakeState::Refine,
        };
        tracing::debug!(step = next.as_str(), "Intake: advanced");
        Transition::Advanced(next)
    }

    pub fn back(&mut self) -> BackOutcome {
        let previous = match self.state {
            IntakeState::Search => return BackOutcome::Exit,
            IntakeState::Refine => IntakeState::Search,
            IntakeState::Analyze { .. } => IntakeState::Refine,
        };
        self.state = previous;
        tracing::debug!(step = self.step().as_str(), "Intake: moved back");
        BackOutcome::Moved(self.step())
    }

    /// Clear the selection and return to Search, from any step.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.last_evaluation = None;
        self.state = IntakeState::Search;
        tracing::debug!("Intake: reset");
    }

    // ── Internals ───────────────────────────────────────────

    fn require(&self, expected: IntakeStep, action: &'static str) -> Result<(), FlowError> {
        let actual = self.step();
        if actual == expected {
            Ok(())
        } else {
            Err(FlowError::WrongStep {
                action,
                expected,
                actual,
            })
        }
    }

    /// Run the engine unless the symptom set is unchanged since last time.
    fn analyze(&mut self) -> TriageOutcome {
        let ids = self.selection.sorted_ids();
        if let Some((cached_ids, outcome)) = &self.last_evaluation {
            if *cached_ids == ids {
                return outcome.clone();
            }
        }
        let outcome = triage::evaluate(ids.iter().copied(), self.catalog);
        self.evaluations += 1;
        self.last_evaluation = Some((ids, outcome.clone()));
        outcome
    }
}
