//! OpenRouter client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenRouterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by OpenRouter")]
    RateLimit,

    #[error("OpenRouter rejected the API key")]
    Unauthorized,

    /// Account balance cannot cover the request (HTTP 402).
    #[error("Insufficient OpenRouter credits")]
    InsufficientCredits,

    #[error("OpenRouter returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The upstream provider failed after OpenRouter accepted the request.
    /// Reported inside a 200 body.
    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("Malformed completion body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Completion had no text")]
    EmptyResponse,
}
