use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use peanuts_core::storage::{repository_error_to_status_code, RepositoryError};

/// JSON body returned for every non-success response produced by this service.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

/// Builds a JSON error response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Unknown"),
        message: message.into(),
    };

    (status, Json(body)).into_response()
}

/// Application error type that wraps `anyhow::Error`.
///
/// Repository errors keep their mapped status code. Everything else is a 500.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Application error");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request failed");
        }

        error_response(status_code, format!("{:#}", self.0))
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
