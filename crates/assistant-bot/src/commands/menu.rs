//! Start/help command - shows the feature menu with inline buttons.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use telegram_client::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, OutboundMessage};

pub struct MenuHandler;

impl MenuHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MenuHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// One button per row; callback tokens mirror the command verbs.
pub fn menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::default()
        .row(vec![InlineKeyboardButton::new("Viết nội dung", "/write")])
        .row(vec![InlineKeyboardButton::new("Tin tức", "/news")])
        .row(vec![InlineKeyboardButton::new("Tính toán", "/calc")])
        .row(vec![InlineKeyboardButton::new("Hướng dẫn", "/help")])
}

#[async_trait]
impl CommandHandler for MenuHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["start"]
    }

    async fn execute(&self, chat_id: ChatId, _args: &str) -> AppResult<OutboundMessage> {
        Ok(OutboundMessage::markdown(chat_id, messages::MENU_TITLE).with_keyboard(menu_keyboard()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_menu_has_keyboard() {
        let reply = MenuHandler::new().execute(5, "").await.unwrap();

        assert_eq!(reply.chat_id, 5);
        assert_eq!(reply.text, messages::MENU_TITLE);
        let keyboard = reply.reply_markup.unwrap();
        let tokens: Vec<&str> = keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .map(|b| b.callback_data.as_str())
            .collect();
        assert_eq!(tokens, vec!["/write", "/news", "/calc", "/help"]);
    }
}
