//! Request handlers.

mod api;
mod assets;
mod export;
mod search;

pub use api::*;
pub use assets::*;
pub use export::*;
pub use search::*;

use axum::response::Html;
use notas::SearchView;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Render a search page view.
fn render_page(state: &AppState, view: &SearchView) -> Result<Html<String>, ApiError> {
    Ok(Html(state.renderer.render(view)?))
}

/// Run blocking lookup work off the async runtime.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("lookup task failed: {e}")))
}
