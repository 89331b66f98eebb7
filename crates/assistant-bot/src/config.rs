//! Application configuration loaded from environment variables.
//!
//! Sections map to `SECTION__FIELD` variables, e.g. `TELEGRAM__BOT_TOKEN`,
//! `OPENROUTER__API_KEY`, `NEWS__API_KEY`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// OpenRouter configuration
    pub openrouter: OpenRouterConfig,

    /// News search configuration
    pub news: NewsConfig,

    /// Webhook server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,

    /// Bot API base URL
    #[serde(default = "default_telegram_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterConfig {
    /// OpenRouter API key
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_openrouter_url")]
    pub base_url: String,

    /// Model for free-form chat
    #[serde(default = "default_model")]
    pub model: String,

    /// Model for `/write` articles
    #[serde(default = "default_content_model")]
    pub content_model: String,

    /// App name shown on the OpenRouter dashboard
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    /// NewsAPI key
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_news_url")]
    pub base_url: String,

    /// Articles per digest
    #[serde(default = "default_news_results")]
    pub max_results: usize,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_telegram_url() -> String {
    "https://api.telegram.org".into()
}

fn default_openrouter_url() -> String {
    "https://openrouter.ai/api/v1".into()
}

fn default_model() -> String {
    "openai/gpt-4".into()
}

fn default_content_model() -> String {
    "qwen/qwen3-32b:free".into()
}

fn default_app_title() -> String {
    "AI Assistant Pro".into()
}

fn default_news_url() -> String {
    "https://newsapi.org/v2".into()
}

fn default_news_results() -> usize {
    3
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Bot tokens look like "123456:ABC"; keep everything a string.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject blank secrets and settings the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        let secrets = [
            ("TELEGRAM__BOT_TOKEN", &self.telegram.bot_token),
            ("OPENROUTER__API_KEY", &self.openrouter.api_key),
            ("NEWS__API_KEY", &self.news.api_key),
        ];

        for (name, value) in secrets {
            if value.trim().is_empty() {
                bail!("{} must not be empty", name);
            }
        }

        if self.news.max_results == 0 {
            bail!("NEWS__MAX_RESULTS must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(value: serde_json::Value) -> Config {
        serde_json::from_value(value).unwrap()
    }

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "telegram": { "bot_token": "123:abc" },
            "openrouter": { "api_key": "or-key" },
            "news": { "api_key": "news-key" }
        })
    }

    #[test]
    fn test_defaults() {
        let config = from_json(minimal());

        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert_eq!(config.openrouter.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.openrouter.model, "openai/gpt-4");
        assert_eq!(config.openrouter.content_model, "qwen/qwen3-32b:free");
        assert_eq!(config.openrouter.app_title, "AI Assistant Pro");
        assert_eq!(config.news.max_results, 3);
        assert_eq!(config.telegram.timeout, Duration::from_secs(15));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_humantime_timeout() {
        let mut value = minimal();
        value["openrouter"]["timeout"] = serde_json::json!("30s");
        let config = from_json(value);
        assert_eq!(config.openrouter.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_secret_fails() {
        let mut value = minimal();
        value["news"] = serde_json::json!({});
        assert!(serde_json::from_value::<Config>(value).is_err());
    }

    #[test]
    fn test_blank_secret_rejected() {
        let mut value = minimal();
        value["telegram"]["bot_token"] = serde_json::json!("  ");
        let err = from_json(value).validate().unwrap_err();
        assert!(err.to_string().contains("TELEGRAM__BOT_TOKEN"));
    }
}
