//! News digest tool using the NewsAPI `everything` endpoint.

use crate::error::ToolError;
use crate::types::Tool;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Characters that would end the text part of a `[text](url)` link.
const LINK_TEXT_BREAKERS: &[char] = &['[', ']'];

/// News search tool producing a Markdown digest.
pub struct NewsTool {
    client: Client,
    base_url: String,
    api_key: SecretString,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Body of a failed NewsAPI request.
#[derive(Debug, Deserialize)]
struct NewsApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: String,
}

impl NewsTool {
    /// Create a new news tool.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ToolError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("assistant-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
            max_results: 3,
        })
    }

    /// Set maximum number of articles in the digest.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    #[instrument(skip(self))]
    async fn search(&self, keyword: &str) -> Result<Vec<Article>, ToolError> {
        let page_size = self.max_results.to_string();
        let response = self
            .client
            .get(format!("{}/everything", self.base_url))
            .query(&[
                ("q", keyword),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(ToolError::RateLimit),
            StatusCode::UNAUTHORIZED => return Err(ToolError::Unauthorized),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                let (code, message) = match serde_json::from_str::<NewsApiError>(&body) {
                    Ok(error) => (error.code, error.message),
                    Err(_) => ("unknown".to_string(), body),
                };
                return Err(ToolError::NewsApi {
                    status: status.as_u16(),
                    code,
                    message,
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        let news: NewsResponse = serde_json::from_str(&body)?;
        debug!(count = news.articles.len(), "News articles received");
        Ok(news.articles)
    }
}

#[async_trait]
impl Tool for NewsTool {
    fn name(&self) -> &str {
        "news"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let keyword = input.trim();
        if keyword.is_empty() {
            return Err(ToolError::EmptyInput);
        }

        let articles = self.search(keyword).await?;
        Ok(format_digest(keyword, &articles, self.max_results))
    }
}

/// Header line plus one bullet per article, in backend order.
fn format_digest(keyword: &str, articles: &[Article], max_results: usize) -> String {
    let mut output = format!("📰 *Tin tức mới nhất về \"{}\"*\n\n", bold_literal(keyword));
    for article in articles.iter().take(max_results) {
        let title = article.title.as_deref().unwrap_or(&article.url);
        output.push_str(&format!("🔹 [{}]({})\n", link_text(title), article.url));
    }
    output
}

/// Text for the inside of a legacy Markdown `*bold*` span.
///
/// Entities do not nest, so only `*` is special there. Escapes are not allowed
/// inside an entity: the span is closed, the star escaped, and reopened.
fn bold_literal(text: &str) -> String {
    text.replace('*', "*\\**")
}

/// Entities do not nest inside link text, but a bracket would cut it short.
fn link_text(text: &str) -> String {
    text.chars().filter(|c| !LINK_TEXT_BREAKERS.contains(c)).collect()
}
