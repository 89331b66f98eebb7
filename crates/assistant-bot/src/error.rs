//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram error: {0}")]
    Telegram(#[from] telegram_client::TelegramError),

    #[error("OpenRouter error: {0}")]
    OpenRouter(#[from] openrouter_client::OpenRouterError),

    #[error("Tool error: {0}")]
    Tool(#[from] tools::ToolError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
