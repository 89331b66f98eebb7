//! Built-in tools used by the assistant bot.

mod error;
mod types;
pub mod builtin;

pub use error::ToolError;
pub use types::Tool;
