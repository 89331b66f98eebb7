//! Bot command handlers.

mod calc;
mod chat;
mod menu;
mod news;
mod write;

pub use calc::CalcHandler;
pub use chat::ChatHandler;
pub use menu::{menu_keyboard, MenuHandler};
pub use news::NewsHandler;
pub use write::WriteHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use telegram_client::{ChatId, OutboundMessage};

/// Prefix marking a message as a command.
pub const COMMAND_PREFIX: char = '/';

/// A parsed `/verb argument` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub args: String,
}

impl Command {
    /// Parse a command. Returns `None` if `text` does not start with the prefix.
    ///
    /// A `@botname` suffix on the verb (group chats) is dropped.
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.strip_prefix(COMMAND_PREFIX)?;
        let (head, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        let verb = head.split_once('@').map_or(head, |(verb, _)| verb);

        Some(Self {
            verb: verb.to_string(),
            args: rest.trim().to_string(),
        })
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command verb without the prefix (e.g. "news").
    fn name(&self) -> &str;

    /// Additional verbs routed to this handler.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Execute the command and produce the final reply.
    ///
    /// `args` is already trimmed and may be empty.
    async fn execute(&self, chat_id: ChatId, args: &str) -> AppResult<OutboundMessage>;
}

/// Verb to handler lookup table.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its name and aliases.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        self.handlers
            .insert(handler.name().to_string(), handler.clone());
        for alias in handler.aliases() {
            self.handlers.insert(alias.to_string(), handler.clone());
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, verb: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(verb).cloned()
    }

    /// Registered verbs, sorted.
    pub fn verbs(&self) -> Vec<&str> {
        let mut verbs: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        verbs.sort_unstable();
        verbs
    }
}
