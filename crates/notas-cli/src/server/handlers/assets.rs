//! Institution image handlers.

use std::path::Path;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::server::state::AppState;
use crate::web::{LOGO_PLACEHOLDER, embedded};

/// Configured logo, or the embedded placeholder.
pub async fn logo(State(state): State<AppState>) -> Response {
    if let Some(path) = state.config.institution.logo_if_present() {
        if let Some(response) = serve_file(path).await {
            return response;
        }
    }

    embedded(LOGO_PLACEHOLDER).unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

/// Configured page background; 404 when absent.
pub async fn background(State(state): State<AppState>) -> Response {
    match state.config.institution.background_if_present() {
        Some(path) => serve_file(path)
            .await
            .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response()),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn serve_file(path: &Path) -> Option<Response> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Some(([(header::CONTENT_TYPE, mime.as_ref().to_string())], bytes).into_response())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::handlers::test_support;
    use notas::MatchMode;

    #[tokio::test]
    async fn test_logo_placeholder_when_missing() {
        let response = logo(State(test_support::state(MatchMode::Loose))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_configured_logo_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();

        let mut state = test_support::state(MatchMode::Loose);
        let mut config = (*state.config).clone();
        config.institution.logo = path;
        state.config = std::sync::Arc::new(config);

        let response = logo(State(state)).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let body = test_support::body_bytes(response).await;
        assert!(body.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn test_background_missing_is_not_found() {
        let response = background(State(test_support::state(MatchMode::Loose))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
