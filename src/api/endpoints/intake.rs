//! Intake session endpoints.
//!
//! Each handler runs one flow command under the registry lock and returns
//! the refreshed view. Nothing here awaits while the lock is held.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::endpoints::catalog::SymptomEntry;
use crate::api::types::{
    parse_intake_id, AnnotateRequest, ApiContext, ApiJson, BackResponse, CreatedIntake,
    IntakeView, SearchQuery, ToggleRequest, ToggleResponse, TransitionResponse,
};
use crate::intake::{search as symptom_search, BackOutcome};

/// `POST /api/intake`: start a new intake in the Search step.
pub async fn create(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<CreatedIntake>), ApiError> {
    let id = ctx.core.create_intake()?;
    let intake = ctx.core.with_intake(id, |s| IntakeView::from_session(s))?;
    Ok((StatusCode::CREATED, Json(CreatedIntake { id, intake })))
}

/// `GET /api/intake/:id`
pub async fn view(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<IntakeView>, ApiError> {
    let id = parse_intake_id(&id)?;
    let view = ctx.core.with_intake(id, |s| IntakeView::from_session(s))?;
    Ok(Json(view))
}

/// `GET /api/intake/:id/search?q=`: label search that hides symptoms the
/// intake already selected.
pub async fn search(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SymptomEntry>>, ApiError> {
    let id = parse_intake_id(&id)?;
    let entries = ctx.core.with_intake(id, |s| {
        let catalog = s.flow.catalog();
        symptom_search::search(catalog, &query.q, s.flow.selection())
            .into_iter()
            .map(|symptom| SymptomEntry::new(symptom, catalog))
            .collect::<Vec<_>>()
    })?;
    Ok(Json(entries))
}

/// `POST /api/intake/:id/toggle`
pub async fn toggle(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let id = parse_intake_id(&id)?;
    let response = ctx.core.with_intake(id, |s| {
        let selected = s.flow.toggle(&req.symptom_id)?;
        Ok::<_, ApiError>(ToggleResponse {
            selected,
            intake: IntakeView::from_session(s),
        })
    })??;
    Ok(Json(response))
}

/// `POST /api/intake/:id/annotate`
pub async fn annotate(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AnnotateRequest>,
) -> Result<Json<IntakeView>, ApiError> {
    let id = parse_intake_id(&id)?;
    let view = ctx.core.with_intake(id, |s| {
        s.flow.annotate(&req.symptom_id, req.severity, req.duration)?;
        Ok::<_, ApiError>(IntakeView::from_session(s))
    })??;
    Ok(Json(view))
}

/// `POST /api/intake/:id/advance`: a blocked transition is a normal
/// response, not an error.
pub async fn advance(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let id = parse_intake_id(&id)?;
    let response = ctx.core.with_intake(id, |s| {
        let transition = s.flow.advance();
        TransitionResponse {
            transition,
            intake: IntakeView::from_session(s),
        }
    })?;
    Ok(Json(response))
}

/// `POST /api/intake/:id/back`: leaving from Search ends the session.
pub async fn back(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<BackResponse>, ApiError> {
    let id = parse_intake_id(&id)?;
    let moved = ctx.core.with_intake_or_close(id, |s| match s.flow.back() {
        BackOutcome::Moved(_) => Some(IntakeView::from_session(s)),
        BackOutcome::Exit => None,
    })?;

    Ok(Json(BackResponse {
        exited: moved.is_none(),
        intake: moved,
    }))
}

/// `POST /api/intake/:id/reset`
pub async fn reset(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<IntakeView>, ApiError> {
    let id = parse_intake_id(&id)?;
    let view = ctx.core.with_intake(id, |s| {
        s.flow.reset();
        IntakeView::from_session(s)
    })?;
    Ok(Json(view))
}

/// `DELETE /api/intake/:id`
pub async fn discard(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_intake_id(&id)?;
    if ctx.core.remove_intake(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Intake not found: {id}")))
    }
}
