//! Connection bootstrap handler.

use crate::{api::ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::header,
    response::IntoResponse,
    Json,
};
use parlor_types::JoinRequest;
use std::sync::Arc;

/// Handler for `POST /api/connection-details`.
///
/// Dispatches the agent into a new room and returns the connection
/// descriptor with `Cache-Control: no-store`. Every failure is a 500 carrying
/// the underlying message; nothing is retried.
pub async fn connection_details_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(join) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let descriptor = state.voice_service.bootstrap(&join).await.map_err(|e| {
        if e.is_config() {
            tracing::error!(error = %e, "voice service is not configured");
        } else {
            tracing::error!(error = %e, "connection bootstrap failed");
        }
        ApiError::InternalServerError(e.to_string())
    })?;

    tracing::info!(
        room = %descriptor.room_name,
        participant = %descriptor.participant_name,
        user_id = %join.user_id,
        agent_id = %join.agent_id,
        "issued connection details"
    );

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(descriptor)))
}
