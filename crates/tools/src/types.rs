//! Tool trait shared by the built-in tools.

use crate::error::ToolError;
use async_trait::async_trait;

/// A named operation over a free-form text argument.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Execute the tool with the user-supplied argument.
    async fn execute(&self, input: &str) -> Result<String, ToolError>;
}
