//! Stateless triage endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiJson, EvaluateRequest, TriageResponse};
use crate::triage;

/// `POST /api/triage/evaluate`: run the engine on an arbitrary id set.
/// Unknown ids are ignored, like the engine itself does.
pub async fn evaluate(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<EvaluateRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let outcome = triage::evaluate(req.symptom_ids.iter().map(String::as_str), ctx.core.catalog());
    Ok(Json(TriageResponse::from(outcome)))
}
