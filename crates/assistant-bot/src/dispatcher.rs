//! Routes inbound events to handlers and delivers the replies.

use crate::commands::{
    CalcHandler, ChatHandler, Command, CommandHandler, CommandRegistry, MenuHandler, NewsHandler,
    WriteHandler,
};
use crate::config::Config;
use crate::content::ContentGenerator;
use crate::error::AppResult;
use crate::messages;
use anyhow::Context;
use openrouter_client::OpenRouterClient;
use std::sync::Arc;
use telegram_client::{
    ChatId, InboundEvent, Media, OutboundMedia, OutboundMessage, TelegramClient, Update,
    MAX_MESSAGE_LENGTH,
};
use tools::builtin::NewsTool;
use tools::Tool;
use tracing::{debug, error, info, instrument, warn};

/// Stateless per-update dispatcher.
pub struct Dispatcher {
    telegram: Arc<TelegramClient>,
    commands: CommandRegistry,
    chat: Arc<dyn CommandHandler>,
}

impl Dispatcher {
    /// Create a dispatcher from an explicit verb table and free-form handler.
    pub fn new(
        telegram: Arc<TelegramClient>,
        commands: CommandRegistry,
        chat: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            telegram,
            commands,
            chat,
        }
    }

    /// Wire the standard command set over the given backends.
    pub fn with_services(
        telegram: Arc<TelegramClient>,
        chat_llm: Arc<OpenRouterClient>,
        content_llm: Arc<OpenRouterClient>,
        news: Arc<dyn Tool>,
    ) -> Self {
        let generator = Arc::new(ContentGenerator::new(content_llm));

        let mut commands = CommandRegistry::new();
        commands.register(Arc::new(MenuHandler::new()));
        commands.register(Arc::new(NewsHandler::new(news)));
        commands.register(Arc::new(WriteHandler::new(generator, telegram.clone())));
        commands.register(Arc::new(CalcHandler::new()));

        let chat = Arc::new(ChatHandler::new(chat_llm, telegram.clone()));

        Self::new(telegram, commands, chat)
    }

    /// Build all clients from configuration.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let telegram = Arc::new(
            TelegramClient::new(
                &config.telegram.api_url,
                &config.telegram.bot_token,
                config.telegram.timeout,
            )
            .context("Failed to create Telegram client")?,
        );

        let chat_llm = OpenRouterClient::new(
            &config.openrouter.api_key,
            &config.openrouter.base_url,
            &config.openrouter.model,
            config.openrouter.timeout,
        )
        .context("Failed to create OpenRouter client")?
        .with_app_title(&config.openrouter.app_title);
        let content_llm = chat_llm.with_model(&config.openrouter.content_model);

        let news = NewsTool::new(
            &config.news.api_key,
            &config.news.base_url,
            config.news.timeout,
        )
        .context("Failed to create news client")?
        .with_max_results(config.news.max_results);

        let dispatcher = Self::with_services(
            telegram,
            Arc::new(chat_llm),
            Arc::new(content_llm),
            Arc::new(news),
        );
        info!("Registered commands: {}", dispatcher.commands.verbs().join(", "));

        Ok(dispatcher)
    }

    /// Telegram client used for replies.
    pub fn telegram(&self) -> &TelegramClient {
        &self.telegram
    }

    /// Handle one webhook update. Failures are logged and answered with an apology.
    #[instrument(skip(self, update), fields(update_id = update.update_id))]
    pub async fn handle_update(&self, update: &Update) {
        let Some(event) = InboundEvent::from_update(update) else {
            debug!("Ignoring unsupported update");
            return;
        };

        let chat_id = event.chat_id();
        if let Err(e) = self.dispatch(event).await {
            error!(chat_id, "Handler error: {}", e);
            if let Err(e) = self
                .telegram
                .send_message(&OutboundMessage::plain(chat_id, messages::APOLOGY))
                .await
            {
                error!(chat_id, "Failed to send apology: {}", e);
            }
        }
    }

    /// Route one event and deliver its reply.
    pub async fn dispatch(&self, event: InboundEvent) -> AppResult<()> {
        match event {
            InboundEvent::Callback { chat_id, data } => match callback_reply(chat_id, &data) {
                Some(reply) => self.deliver(reply).await,
                None => {
                    debug!(chat_id, data = %data, "Unknown callback token");
                    Ok(())
                }
            },
            InboundEvent::Media { chat_id, media } => {
                self.deliver(media_ack(chat_id, &media)).await?;
                if let Some(echo) = media_echo(chat_id, &media) {
                    self.telegram.send_media(&echo).await?;
                }
                Ok(())
            }
            InboundEvent::Text { chat_id, text } => {
                let reply = match Command::parse(&text) {
                    Some(command) => self.run_command(chat_id, &command).await?,
                    None => self.chat.execute(chat_id, &text).await?,
                };
                self.deliver(reply).await
            }
        }
    }

    async fn run_command(&self, chat_id: ChatId, command: &Command) -> AppResult<OutboundMessage> {
        match self.commands.get(&command.verb) {
            Some(handler) => {
                debug!(chat_id, verb = %command.verb, "Running command");
                handler.execute(chat_id, &command.args).await
            }
            None => {
                debug!(chat_id, verb = %command.verb, "Unknown command");
                Ok(OutboundMessage::plain(chat_id, messages::INVALID_COMMAND))
            }
        }
    }

    /// Send a reply, falling back to plain text if Telegram rejects the markup.
    async fn deliver(&self, mut message: OutboundMessage) -> AppResult<()> {
        if message.truncate(MAX_MESSAGE_LENGTH) {
            warn!(chat_id = message.chat_id, "Reply truncated to {} UTF-16 units", MAX_MESSAGE_LENGTH);
        }

        match self.telegram.send_message(&message).await {
            Err(e) if e.is_bad_request() && message.parse_mode.is_some() => {
                warn!(chat_id = message.chat_id, "Markup rejected, resending as plain text: {}", e);
                message.parse_mode = None;
                self.telegram.send_message(&message).await?;
                Ok(())
            }
            result => Ok(result?),
        }
    }
}

/// Reply for an inline keyboard button press.
pub fn callback_reply(chat_id: ChatId, data: &str) -> Option<OutboundMessage> {
    let reply = match data {
        "/write" => OutboundMessage::plain(chat_id, messages::WRITE_PROMPT),
        "/news" => OutboundMessage::plain(chat_id, messages::NEWS_PROMPT),
        "/calc" => OutboundMessage::plain(chat_id, messages::CALC_PROMPT),
        "/help" => OutboundMessage::markdown(chat_id, messages::MENU_TEXT),
        _ => return None,
    };
    Some(reply)
}

/// Acknowledgement text describing received media.
pub fn media_ack(chat_id: ChatId, media: &Media) -> OutboundMessage {
    let text = match media {
        Media::Photo { .. } => messages::PHOTO_RECEIVED.to_string(),
        Media::Sticker { emoji } => messages::sticker_received(emoji.as_deref()),
        Media::Document { file_name, .. } => messages::document_received(file_name.as_deref()),
        Media::Audio { .. } => messages::AUDIO_RECEIVED.to_string(),
        Media::Video { .. } => messages::VIDEO_RECEIVED.to_string(),
    };
    OutboundMessage::plain(chat_id, text)
}

/// Media sent back after the acknowledgement. Photos carry a caption.
pub fn media_echo(chat_id: ChatId, media: &Media) -> Option<OutboundMedia> {
    let echo = media.echo(chat_id)?;
    Some(match media {
        Media::Photo { .. } => echo.with_caption(messages::PHOTO_CAPTION),
        _ => echo,
    })
}
