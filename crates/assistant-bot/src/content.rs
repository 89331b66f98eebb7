//! Marketing article generation.

use openrouter_client::{OpenRouterClient, OpenRouterError};
use std::sync::Arc;
use tracing::{info, instrument};

/// Writes short Markdown articles on a topic.
pub struct ContentGenerator {
    llm: Arc<OpenRouterClient>,
}

impl ContentGenerator {
    pub fn new(llm: Arc<OpenRouterClient>) -> Self {
        Self { llm }
    }

    /// Generate an article; the completion text is returned verbatim.
    #[instrument(skip(self, topic), fields(model = %self.llm.model(), topic_len = topic.len()))]
    pub async fn generate(&self, topic: &str) -> Result<String, OpenRouterError> {
        let content = self.llm.complete(&article_prompt(topic)).await?;
        info!(chars = content.chars().count(), "Article generated");
        Ok(content)
    }
}

/// Instruction template wrapped around the user's topic.
pub fn article_prompt(topic: &str) -> String {
    format!(
        "Bạn là một chuyên gia content marketing. Hãy viết một bài ngắn về chủ đề: \"{}\".
Yêu cầu:
- Giọng văn tự nhiên, hấp dẫn
- Có tiêu đề, mở bài, thân bài, kết luận
- Dùng markdown để định dạng",
        topic
    )
}
