//! PDF export handler.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use notas::{GradeLookup, NotasError, SearchView, dataset_message};

use super::{SearchParams, blocking, render_page};
use crate::server::error::{ApiError, notas_status};
use crate::server::state::AppState;

/// Download the transcript of the student the query resolves to.
///
/// Failures render the search page with a message instead of a PDF.
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let lookup = state.lookup.clone();
    let SearchParams { q, nombre } = params.clone();
    let result = blocking(move || {
        lookup.export_pdf(&q, nombre.as_deref()).map_err(|e| {
            let view = failure_view(&lookup, &q, nombre.as_deref(), &e);
            (e, view)
        })
    })
    .await?;

    match result {
        Ok(pdf) => Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", pdf.file_name),
                ),
            ],
            pdf.bytes,
        )
            .into_response()),
        Err((e, view)) => {
            tracing::warn!(error = %e, query = %params.q, "transcript export failed");
            Ok((notas_status(&e), render_page(&state, &view)?).into_response())
        }
    }
}

fn failure_view(
    lookup: &GradeLookup,
    q: &str,
    nombre: Option<&str>,
    err: &NotasError,
) -> SearchView {
    match err {
        // Same messages and choices as the results page.
        NotasError::Query(_) | NotasError::NoRecords(_) | NotasError::MultipleStudents { .. } => {
            lookup.search(q, nombre)
        }
        e if notas_status(e) == axum::http::StatusCode::SERVICE_UNAVAILABLE => {
            SearchView::failure(q, dataset_message(e))
        }
        _ => SearchView::failure(q, "Error: No se pudo generar el PDF."),
    }
}
