//! News command - Markdown digest of the most relevant articles.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use std::sync::Arc;
use telegram_client::{ChatId, OutboundMessage};
use tools::Tool;
use tracing::info;

pub struct NewsHandler {
    news: Arc<dyn Tool>,
}

impl NewsHandler {
    pub fn new(news: Arc<dyn Tool>) -> Self {
        Self { news }
    }
}

#[async_trait]
impl CommandHandler for NewsHandler {
    fn name(&self) -> &str {
        "news"
    }

    async fn execute(&self, chat_id: ChatId, args: &str) -> AppResult<OutboundMessage> {
        if args.is_empty() {
            return Ok(OutboundMessage::plain(chat_id, messages::NEWS_MISSING_KEYWORD));
        }

        info!(keyword = %args, "Fetching news");
        let digest = self.news.execute(args).await?;
        Ok(OutboundMessage::markdown(chat_id, digest).with_link_preview())
    }
}
