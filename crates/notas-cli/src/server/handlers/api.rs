//! JSON API handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use notas::render::Level;
use notas::{DatasetSummary, SearchView};

use super::blocking;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query string for the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSearchParams {
    #[serde(default)]
    pub q: String,
    pub name: Option<String>,
}

/// Response for the search endpoint.
#[derive(Serialize)]
pub struct SearchResponse {
    /// `found`, `ambiguous`, `not_found` or `invalid_query`.
    pub status: &'static str,
    #[serde(flatten)]
    pub view: SearchView,
}

/// Resolve a query and return the classified rows.
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<ApiSearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let lookup = state.lookup.clone();
    let view = blocking(move || {
        lookup
            .dataset()
            .get()
            .map(|_| lookup.search(&params.q, params.name.as_deref()))
    })
    .await?
    .map_err(|e| ApiError::DatasetUnavailable(e.to_string()))?;

    Ok(Json(SearchResponse {
        status: search_status(&view),
        view,
    }))
}

/// Summary of the loaded dataset.
pub async fn api_dataset(State(state): State<AppState>) -> Result<Json<DatasetSummary>, ApiError> {
    let lookup = state.lookup.clone();
    let summary = blocking(move || lookup.summary())
        .await?
        .map_err(|e| ApiError::DatasetUnavailable(e.to_string()))?;
    Ok(Json(summary))
}

fn search_status(view: &SearchView) -> &'static str {
    if !view.candidates.is_empty() {
        "ambiguous"
    } else if !view.transcripts.is_empty() {
        "found"
    } else if view
        .message
        .as_ref()
        .is_some_and(|m| m.level == Level::Warning)
    {
        "invalid_query"
    } else {
        "not_found"
    }
}
