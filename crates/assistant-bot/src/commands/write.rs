//! Write command - generates a marketing article on a topic.

use crate::commands::CommandHandler;
use crate::content::ContentGenerator;
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use std::sync::Arc;
use telegram_client::{ChatId, OutboundMessage, TelegramClient};

pub struct WriteHandler {
    generator: Arc<ContentGenerator>,
    telegram: Arc<TelegramClient>,
}

impl WriteHandler {
    pub fn new(generator: Arc<ContentGenerator>, telegram: Arc<TelegramClient>) -> Self {
        Self {
            generator,
            telegram,
        }
    }
}

#[async_trait]
impl CommandHandler for WriteHandler {
    fn name(&self) -> &str {
        "write"
    }

    async fn execute(&self, chat_id: ChatId, args: &str) -> AppResult<OutboundMessage> {
        if args.is_empty() {
            return Ok(OutboundMessage::plain(chat_id, messages::WRITE_MISSING_TOPIC));
        }

        // Generation takes a while; acknowledge first.
        self.telegram
            .send_message(&OutboundMessage::plain(chat_id, messages::WRITING))
            .await?;

        let article = self.generator.generate(args).await?;
        Ok(OutboundMessage::markdown(chat_id, article))
    }
}
