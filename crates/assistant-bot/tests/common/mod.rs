//! Common test utilities for integration tests.

#![allow(dead_code)]

use assistant_bot::Dispatcher;
use openrouter_client::OpenRouterClient;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use telegram_client::{TelegramClient, Update};
use tools::builtin::NewsTool;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// Mock backends plus a dispatcher wired to them.
pub struct Harness {
    pub telegram: MockServer,
    pub llm: MockServer,
    pub news: MockServer,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// All backends up; Telegram accepts every call.
    pub async fn start() -> Self {
        let telegram = MockServer::start().await;
        let llm = MockServer::start().await;
        let news = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(telegram_ok())
            .mount(&telegram)
            .await;

        let dispatcher = dispatcher_for(&telegram, &llm, &news);

        Self {
            telegram,
            llm,
            news,
            dispatcher,
        }
    }

    /// Same as [`Harness::start`] but Telegram mocks are left to the test.
    pub async fn start_without_telegram_mocks() -> Self {
        let telegram = MockServer::start().await;
        let llm = MockServer::start().await;
        let news = MockServer::start().await;
        let dispatcher = dispatcher_for(&telegram, &llm, &news);

        Self {
            telegram,
            llm,
            news,
            dispatcher,
        }
    }

    pub async fn handle(&self, update: Value) {
        let update: Update = serde_json::from_value(update).unwrap();
        self.dispatcher.handle_update(&update).await;
    }

    /// Bot API calls in arrival order as (method, body).
    pub async fn sent(&self) -> Vec<(String, Value)> {
        sent_to(&self.telegram).await
    }

    pub async fn llm_requests(&self) -> Vec<Value> {
        bodies(&self.llm).await
    }

    pub async fn news_request_count(&self) -> usize {
        self.news.received_requests().await.unwrap_or_default().len()
    }
}

pub fn dispatcher_for(telegram: &MockServer, llm: &MockServer, news: &MockServer) -> Dispatcher {
    let telegram_client =
        TelegramClient::new(telegram.uri(), TOKEN, Duration::from_secs(5)).unwrap();
    let chat_llm =
        OpenRouterClient::new("test-api-key", llm.uri(), "chat-model", Duration::from_secs(5))
            .unwrap();
    let content_llm = chat_llm.with_model("content-model");
    let news_tool = NewsTool::new("news-key", news.uri(), Duration::from_secs(5)).unwrap();

    Dispatcher::with_services(
        Arc::new(telegram_client),
        Arc::new(chat_llm),
        Arc::new(content_llm),
        Arc::new(news_tool),
    )
}

pub fn telegram_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "result": { "message_id": 1 }
    }))
}

pub fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "gen-1",
        "model": "test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

pub fn text_update(chat_id: i64, text: &str) -> Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "date": 1700000000,
            "chat": { "id": chat_id, "type": "private" },
            "text": text
        }
    })
}

pub fn callback_update(chat_id: i64, data: &str) -> Value {
    serde_json::json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb-1",
            "from": { "id": chat_id, "is_bot": false, "first_name": "Test" },
            "message": { "message_id": 11, "chat": { "id": chat_id } },
            "data": data
        }
    })
}

pub async fn sent_to(server: &MockServer) -> Vec<(String, Value)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| {
            let method = r
                .url
                .path()
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
            let body = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
            (method, body)
        })
        .collect()
}

async fn bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
        .collect()
}
