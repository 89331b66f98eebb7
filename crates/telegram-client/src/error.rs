//! Telegram client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {status} - {description}")]
    Api { status: u16, description: String },
}

impl From<reqwest::Error> for TelegramError {
    // Request URLs carry the bot token.
    fn from(e: reqwest::Error) -> Self {
        TelegramError::Http(e.without_url())
    }
}

impl TelegramError {
    /// Whether the Bot API rejected the request itself (bad entities, too long, ...).
    pub fn is_bad_request(&self) -> bool {
        matches!(self, TelegramError::Api { status: 400, .. })
    }
}
