//! Free-form chat - forwards non-command text to the completion backend.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use openrouter_client::OpenRouterClient;
use std::sync::Arc;
use telegram_client::{ChatId, OutboundMessage, TelegramClient};
use tracing::debug;

/// Default handler for messages without a command prefix.
///
/// Not registered in the verb table; the dispatcher calls it directly
/// with the whole message text as `args`.
pub struct ChatHandler {
    llm: Arc<OpenRouterClient>,
    telegram: Arc<TelegramClient>,
}

impl ChatHandler {
    pub fn new(llm: Arc<OpenRouterClient>, telegram: Arc<TelegramClient>) -> Self {
        Self { llm, telegram }
    }
}

#[async_trait]
impl CommandHandler for ChatHandler {
    fn name(&self) -> &str {
        "chat"
    }

    async fn execute(&self, chat_id: ChatId, args: &str) -> AppResult<OutboundMessage> {
        self.telegram
            .send_message(&OutboundMessage::plain(chat_id, messages::THINKING))
            .await?;

        debug!(model = %self.llm.model(), "Forwarding prompt");
        let answer = self.llm.complete(args).await?;
        Ok(OutboundMessage::markdown(chat_id, answer))
    }
}
