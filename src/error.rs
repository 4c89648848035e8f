use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body of the report endpoints.
///
/// Only fixed, client-safe text goes here. Upstream detail (bodies, URLs)
/// stays in the server log.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Stable code, e.g. "UPSTREAM_TIMEOUT"
    pub code: String,
}

/// Failures the HTTP layer can report to a client
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;

    /// Message shown to the client in place of the `Display` text
    fn public_message(&self) -> &'static str;
}

/// Log the full error, answer with its status, code and public message
pub fn error_response<E: HttpError>(err: &E) -> Response {
    let status = err.status_code();
    let code = err.error_code();

    tracing::warn!(error = %err, status = %status, code, "Forecast request failed");

    let body = ErrorResponse {
        error: err.public_message().to_string(),
        code: code.to_string(),
    };

    (status, Json(body)).into_response()
}
