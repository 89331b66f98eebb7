//! Telegram Bot API HTTP client.

use crate::error::TelegramError;
use crate::types::*;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Telegram Bot API client.
///
/// The bot token is part of every request path, so it is kept in a
/// `SecretString` and never appears in logs or debug output.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_url: String,
    token: SecretString,
}

impl TelegramClient {
    /// Create a new Telegram client.
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: SecretString::new(token.into()),
        })
    }

    /// Check that the token is accepted by the Bot API.
    pub async fn health_check(&self) -> bool {
        self.get_me().await.is_ok()
    }

    /// Fetch the bot's own identity.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<BotUser, TelegramError> {
        let response = self.client.get(self.method_url("getMe")).send().await?;
        self.handle_response(response).await
    }

    /// Send a text message.
    #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
    pub async fn send_message(&self, message: &OutboundMessage) -> Result<(), TelegramError> {
        self.post::<_, serde_json::Value>("sendMessage", message)
            .await?;
        debug!("Sent message to {}", message.chat_id);
        Ok(())
    }

    /// Send a photo, document, audio or video by file reference.
    #[instrument(skip(self, media), fields(chat_id = media.chat_id, kind = ?media.kind))]
    pub async fn send_media(&self, media: &OutboundMedia) -> Result<(), TelegramError> {
        self.post::<_, serde_json::Value>(media.kind.method(), media)
            .await?;
        debug!("Sent {:?} to {}", media.kind, media.chat_id);
        Ok(())
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url,
            self.token.expose_secret(),
            method
        )
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Unwrap the `{ok, result, description}` envelope.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let description = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(body);
            warn!("Telegram API error {}: {}", status, description);
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description,
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        match envelope.result {
            Some(result) if envelope.ok => Ok(result),
            _ => Err(TelegramError::Api {
                status: status.as_u16(),
                description: envelope
                    .description
                    .unwrap_or_else(|| "Missing result".into()),
            }),
        }
    }
}
