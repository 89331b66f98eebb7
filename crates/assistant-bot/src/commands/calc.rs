//! Calc command - evaluates an arithmetic expression.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::messages;
use async_trait::async_trait;
use telegram_client::{ChatId, OutboundMessage};
use tools::builtin::CalculatorTool;

pub struct CalcHandler {
    calculator: CalculatorTool,
}

impl CalcHandler {
    pub fn new() -> Self {
        Self {
            calculator: CalculatorTool::new(),
        }
    }
}

impl Default for CalcHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for CalcHandler {
    fn name(&self) -> &str {
        "calc"
    }

    async fn execute(&self, chat_id: ChatId, args: &str) -> AppResult<OutboundMessage> {
        if args.is_empty() {
            return Ok(OutboundMessage::plain(chat_id, messages::CALC_MISSING_EXPRESSION));
        }

        Ok(OutboundMessage::plain(chat_id, self.calculator.reply(args)))
    }
}
