//! Telegram Bot API client and webhook update types.

mod client;
mod error;
mod types;

pub use client::TelegramClient;
pub use error::TelegramError;
pub use types::*;
