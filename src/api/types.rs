//! Shared types for the API layer: router context, request bodies and
//! response views.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::{CoreState, IntakeSession};
use crate::intake::{search, RefineItem, StepProgress, Transition};
use crate::models::{DurationBucket, IntakeStep, Symptom};
use crate::triage::{crisis_resources, CrisisResources, TriageOutcome};

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Parse a path segment as an intake id.
pub fn parse_intake_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid intake ID format".into()))
}

// ═══════════════════════════════════════════════════════════
// Request bodies
// ═══════════════════════════════════════════════════════════

/// `Json` extractor whose rejections use the API error body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SymptomQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub symptom_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub symptom_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateRequest {
    pub symptom_id: String,
    #[serde(default)]
    pub severity: Option<u8>,
    #[serde(default)]
    pub duration: Option<DurationBucket>,
}

// ═══════════════════════════════════════════════════════════
// Response views
// ═══════════════════════════════════════════════════════════

/// Engine output as sent to clients. Crisis responses carry the safety
/// resources alongside `isCrisis`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResponse {
    #[serde(flatten)]
    pub outcome: TriageOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_resources: Option<CrisisResources>,
}

impl From<TriageOutcome> for TriageResponse {
    fn from(outcome: TriageOutcome) -> Self {
        let resources = outcome.is_crisis().then(crisis_resources);
        Self {
            outcome,
            crisis_resources: resources,
        }
    }
}

/// Everything a client needs to render the current intake screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub step: IntakeStep,
    pub step_title: &'static str,
    pub progress: StepProgress,
    pub can_advance: bool,
    pub crisis_pending: bool,
    /// Selected symptoms in selection order, with their annotations.
    pub selected: Vec<RefineItem>,
    /// Starter chips, only while searching.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Symptom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TriageResponse>,
}

impl IntakeView {
    pub fn from_session(session: &IntakeSession) -> Self {
        let flow = &session.flow;
        let step = flow.step();
        let suggestions = match step {
            IntakeStep::Search => search::common_symptoms(flow.catalog(), flow.selection())
                .into_iter()
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        Self {
            id: session.id,
            created_at: session.created_at,
            step,
            step_title: step.title(),
            progress: flow.progress(),
            can_advance: flow.can_advance(),
            crisis_pending: flow.crisis_pending(),
            selected: flow.refine_items(),
            suggestions,
            result: flow.outcome().cloned().map(TriageResponse::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedIntake {
    pub id: Uuid,
    pub intake: IntakeView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub selected: bool,
    pub intake: IntakeView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub transition: Transition,
    pub intake: IntakeView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackResponse {
    /// The user left the intake; the session is gone.
    pub exited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intake: Option<IntakeView>,
}
