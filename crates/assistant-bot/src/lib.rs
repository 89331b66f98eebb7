//! Telegram assistant bot.
//!
//! Receives webhook updates, routes commands (`/start`, `/help`, `/news`,
//! `/write`, `/calc`), media and free-form text, and replies through the
//! Bot API:
//! - free-form text and `/write` go to an OpenRouter completion model
//! - `/news` builds a digest from NewsAPI
//! - `/calc` evaluates arithmetic with a restricted parser

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod dispatcher;
pub mod error;
pub mod messages;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{AppError, AppResult};
