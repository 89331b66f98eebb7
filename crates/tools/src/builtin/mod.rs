//! Built-in tools.

mod calculator;
mod news;

pub use calculator::{evaluate, CalculatorTool, INVALID_EXPRESSION};
pub use news::NewsTool;
