//! Shared API plumbing: error mapping and health check.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parlor_types::ErrorBody;
use serde_json::{json, Value};
use thiserror::Error;

/// API error type mapping to HTTP status codes.
///
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
