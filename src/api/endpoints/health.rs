//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub active_intakes: usize,
    pub max_intakes: usize,
    pub uptime_secs: i64,
}

/// `GET /api/health`: liveness, live intake count against capacity, and
/// uptime.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let active_intakes = ctx.core.intake_count()?;
    let uptime_secs = (Utc::now() - ctx.core.started_at()).num_seconds().max(0);

    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        active_intakes,
        max_intakes: ctx.core.config().max_sessions,
        uptime_secs,
    }))
}
