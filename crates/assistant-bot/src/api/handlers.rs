//! HTTP request handlers.

use super::types::HealthResponse;
use super::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use telegram_client::Update;
use tracing::warn;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        started_at: state.started_at,
    })
}

/// Telegram webhook endpoint.
///
/// Always answers 200 so Telegram does not redeliver the update; failures
/// are logged and, where possible, reported to the chat by the dispatcher.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(body_len = body.len(), "Malformed update: {}", e);
            return StatusCode::OK;
        }
    };

    state.dispatcher.handle_update(&update).await;
    StatusCode::OK
}
