//! HTTP webhook API.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::dispatcher::Dispatcher;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Update dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Process start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            started_at: Utc::now(),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/webhook", post(handlers::webhook))
        // Path used by serverless deployments of the same bot
        .route("/api", post(handlers::webhook))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
