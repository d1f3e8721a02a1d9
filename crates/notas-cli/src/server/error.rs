//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notas::NotasError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// The grade dataset could not be loaded.
    DatasetUnavailable(String),
    /// Internal server error.
    Internal(String),
    /// Error from the notas library.
    Notas(NotasError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DatasetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Notas(e) => notas_status(e),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::DatasetUnavailable(_) => "dataset_unavailable",
            ApiError::Internal(_) => "internal",
            ApiError::Notas(NotasError::Query(_)) => "invalid_query",
            ApiError::Notas(NotasError::NoRecords(_)) => "not_found",
            ApiError::Notas(NotasError::MultipleStudents { .. }) => "ambiguous",
            ApiError::Notas(_) => "notas_error",
        }
    }
}

/// HTTP status for a library error.
pub fn notas_status(err: &NotasError) -> StatusCode {
    match err {
        NotasError::Query(_) => StatusCode::BAD_REQUEST,
        NotasError::NoRecords(_) => StatusCode::NOT_FOUND,
        NotasError::MultipleStudents { .. } => StatusCode::CONFLICT,
        NotasError::DatasetNotFound(_)
        | NotasError::Io { .. }
        | NotasError::Csv(_)
        | NotasError::Spreadsheet(_)
        | NotasError::SheetNotFound { .. }
        | NotasError::MissingColumn(_)
        | NotasError::EmptyData(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.code().to_string();
        let message = match self {
            ApiError::DatasetUnavailable(msg) | ApiError::Internal(msg) => msg,
            ApiError::Notas(e) => e.to_string(),
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<NotasError> for ApiError {
    fn from(err: NotasError) -> Self {
        ApiError::Notas(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::DatasetUnavailable(msg) => write!(f, "Dataset unavailable: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Notas(e) => write!(f, "Notas error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
