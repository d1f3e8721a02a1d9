//! Embedded static files for the web UI.

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

/// Placeholder served when no institution logo is configured.
pub const LOGO_PLACEHOLDER: &str = "logo.svg";

/// Serve embedded static files.
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    embedded(path).unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not Found").into_response())
}

/// Response for an embedded file, if it exists.
pub fn embedded(path: &str) -> Option<Response> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Some(
        (
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            content.data.into_owned(),
        )
            .into_response(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stylesheet_is_embedded() {
        let response = static_handler("/style.css".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = static_handler("/missing.js".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_logo_placeholder_exists() {
        assert!(Assets::get(LOGO_PLACEHOLDER).is_some());
    }
}
