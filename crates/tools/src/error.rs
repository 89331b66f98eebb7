//! Tool errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    /// Blank expression or keyword.
    #[error("Nothing to process")]
    EmptyInput,

    /// Input outside the calculator grammar.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rate limited by news service")]
    RateLimit,

    #[error("News service rejected the API key")]
    Unauthorized,

    /// NewsAPI answered with `"status": "error"`.
    #[error("NewsAPI error {status} ({code}): {message}")]
    NewsApi {
        status: u16,
        code: String,
        message: String,
    },
}

impl From<reqwest::Error> for ToolError {
    // NewsAPI takes its key as a query parameter.
    fn from(e: reqwest::Error) -> Self {
        ToolError::Http(e.without_url())
    }
}
