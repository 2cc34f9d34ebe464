//! API error types with IntoResponse
//!
//! Only rejected input becomes an HTTP error. Store failures are already
//! normalized by the repositories and travel in the response body.

use audioplane_core::models::ValidationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// A field failed validation (400)
    Validation(ValidationError),

    /// Request body missing, not JSON, or the wrong shape (400)
    Body { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string()
            }),
            Self::Body { message } => json!({
                "error": "invalid_body",
                "message": message
            }),
        };
        tracing::debug!(error = %body["message"], "request rejected");

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
