//! Search page handlers.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use notas::SearchView;

use super::{blocking, render_page};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query string of the search form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Identifier or name as typed.
    #[serde(default)]
    pub q: String,
    /// Chosen student name when an identifier is shared.
    pub nombre: Option<String>,
}

/// The empty search page.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_page(&state, &SearchView::blank())
}

/// Results page for a submitted search.
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, ApiError> {
    let lookup = state.lookup.clone();
    let view = blocking(move || lookup.search(&params.q, params.nombre.as_deref())).await?;
    render_page(&state, &view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::handlers::test_support;
    use notas::MatchMode;

    fn params(q: &str, nombre: Option<&str>) -> Query<SearchParams> {
        Query(SearchParams {
            q: q.to_string(),
            nombre: nombre.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let Html(html) = index(State(test_support::state(MatchMode::Loose)))
            .await
            .unwrap();
        assert!(html.contains("action=\"/buscar\""));
        assert!(html.contains("Universidad Central"));
        assert!(html.contains("logo-placeholder"));
    }

    #[tokio::test]
    async fn test_search_shows_results() {
        let state = test_support::state(MatchMode::Strict);
        let Html(html) = search_page(State(state), params("25-0022-02", None))
            .await
            .unwrap();
        assert!(html.contains("Se encontraron 2 registros."));
        assert!(html.contains("Cálculo I"));
        assert!(html.contains("Sin Derecho"));
        assert!(html.contains("action=\"/exportar\""));
    }

    #[tokio::test]
    async fn test_search_offers_candidates_for_shared_id() {
        let state = test_support::state(MatchMode::Strict);
        let Html(html) = search_page(State(state.clone()), params("25-0303-01", None))
            .await
            .unwrap();
        assert!(html.contains("name=\"nombre\" value=\"Ana Ruiz\""));
        assert!(html.contains("name=\"nombre\" value=\"Ana Rivas\""));

        let Html(html) = search_page(State(state), params("25-0303-01", Some("Ana Rivas")))
            .await
            .unwrap();
        assert!(html.contains("Se encontraron 1 registros."));
        assert!(html.contains("Aprobado"));
    }

    #[tokio::test]
    async fn test_strict_search_rejects_bad_format() {
        let state = test_support::state(MatchMode::Strict);
        let Html(html) = search_page(State(state), params("juan", None)).await.unwrap();
        assert!(html.contains("Formato de carnet inválido"));
    }

    #[tokio::test]
    async fn test_missing_dataset_message() {
        let state = test_support::missing_dataset_state();
        let Html(html) = search_page(State(state), params("25-0022-02", None))
            .await
            .unwrap();
        assert!(html.contains("No se encuentra la base de datos de notas."));
        assert!(html.contains("message error"));
    }
}
