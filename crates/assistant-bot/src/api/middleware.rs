//! Request logging middleware.

use axum::{extract::Request, http::header::CONTENT_LENGTH, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Log each request with its latency. Health probes stay at debug level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let body_len = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if !status.is_success() {
        warn!(%method, %path, %status, elapsed_ms, "Request failed");
    } else if path == "/health" {
        debug!(%method, %path, %status, elapsed_ms, "Health probe");
    } else {
        info!(%method, %path, %status, ?body_len, elapsed_ms, "Update handled");
    }

    response
}
