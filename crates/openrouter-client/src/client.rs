//! OpenRouter HTTP client.

use crate::error::OpenRouterError;
use crate::types::*;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// OpenRouter completion client.
///
/// One instance is bound to one model; [`OpenRouterClient::with_model`]
/// derives a sibling that shares the key and connection pool. The key is
/// kept in a `SecretString` so it never shows up in debug output.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    app_title: Option<String>,
}

impl OpenRouterClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OpenRouterError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
            model: model.into(),
            app_title: None,
        })
    }

    /// Same credentials and endpoint, different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    /// Attribute requests to an app name on the OpenRouter dashboard (`X-Title`).
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single-turn prompt as a user message.
    pub async fn complete(&self, prompt: &str) -> Result<String, OpenRouterError> {
        self.chat(vec![Message::user(prompt)]).await
    }

    /// Run a chat completion and return the first choice's text.
    #[instrument(skip(self, messages), fields(model = %self.model, message_count = messages.len()))]
    pub async fn chat(&self, messages: Vec<Message>) -> Result<String, OpenRouterError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
        };

        let response = self
            .authorized(self.client.post(format!("{}/chat/completions", self.base_url)))
            .json(&request)
            .send()
            .await?;

        let completion = self.handle_response(response).await?;

        if let Some(error) = completion.error {
            warn!(code = error.code, "Provider failed: {}", error.message);
            return Err(OpenRouterError::Provider {
                code: error.code,
                message: error.message,
            });
        }

        if let Some(usage) = &completion.usage {
            debug!(
                id = ?completion.id,
                served_by = ?completion.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(OpenRouterError::EmptyResponse)?;
        if let Some(reason) = choice.finish_reason.as_deref().filter(|r| *r != "stop") {
            warn!(finish_reason = reason, "Completion did not finish normally");
        }

        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(OpenRouterError::EmptyResponse)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.bearer_auth(self.api_key.expose_secret());
        match &self.app_title {
            Some(title) => request.header("X-Title", title),
            None => request,
        }
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatResponse, OpenRouterError> {
        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        let body = response.text().await?;
        debug!("Response body: {}", truncate(&body, 200));
        Ok(serde_json::from_str(&body)?)
    }

    async fn extract_error(&self, response: reqwest::Response) -> OpenRouterError {
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Rate limit exceeded");
                OpenRouterError::RateLimit
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication failed");
                OpenRouterError::Unauthorized
            }
            StatusCode::PAYMENT_REQUIRED => {
                warn!("Out of credits");
                OpenRouterError::InsufficientCredits
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                // Prefer the structured message; fall back to the raw body.
                let message = match serde_json::from_str::<ErrorBody>(&body) {
                    Ok(parsed) => parsed.error.message,
                    Err(_) if body.is_empty() => "Unknown error".into(),
                    Err(_) => body,
                };
                OpenRouterError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
