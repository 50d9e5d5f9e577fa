//! Read-only catalog endpoints: taxonomy listing, search, red flags and
//! condition profiles.

use std::str::FromStr;

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SymptomQuery};
use crate::catalog::{category_style, Catalog, CategoryStyle};
use crate::intake::{search, Selection};
use crate::models::{Condition, Symptom, SymptomCategory};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    #[serde(flatten)]
    pub symptom: Symptom,
    pub style: CategoryStyle,
    /// Condition ids whose profile lists this symptom.
    pub related_conditions: Vec<&'static str>,
}

impl SymptomEntry {
    pub fn new(symptom: &Symptom, catalog: &Catalog) -> Self {
        Self {
            symptom: symptom.clone(),
            style: category_style(symptom.category),
            related_conditions: catalog
                .conditions_for_symptom(symptom.id)
                .map(|c| c.id)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagsResponse {
    pub symptom_ids: Vec<&'static str>,
}

/// `GET /api/symptoms?category=&q=`: whole taxonomy, one category, or a
/// label search. `q` wins over `category` when both are given.
pub async fn symptoms(
    State(ctx): State<ApiContext>,
    Query(query): Query<SymptomQuery>,
) -> Result<Json<Vec<SymptomEntry>>, ApiError> {
    let catalog = ctx.core.catalog();

    let entries: Vec<SymptomEntry> = match (query.q.as_deref(), query.category.as_deref()) {
        (Some(q), _) => search::search(catalog, q, &Selection::new())
            .into_iter()
            .map(|s| SymptomEntry::new(s, catalog))
            .collect(),
        (None, Some(raw)) => {
            let category = SymptomCategory::from_str(raw)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            catalog
                .symptoms_in(category)
                .map(|s| SymptomEntry::new(s, catalog))
                .collect()
        }
        (None, None) => catalog
            .symptoms()
            .iter()
            .map(|s| SymptomEntry::new(s, catalog))
            .collect(),
    };

    Ok(Json(entries))
}

/// `GET /api/symptoms/red-flags`
pub async fn red_flags(State(ctx): State<ApiContext>) -> Json<RedFlagsResponse> {
    Json(RedFlagsResponse {
        symptom_ids: ctx.core.catalog().red_flag_ids(),
    })
}

/// `GET /api/conditions`
pub async fn conditions(State(ctx): State<ApiContext>) -> Json<Vec<Condition>> {
    Json(ctx.core.catalog().conditions().to_vec())
}
