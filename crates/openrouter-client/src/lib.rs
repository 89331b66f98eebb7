//! OpenRouter client with OpenAI-compatible API.

mod client;
mod error;
mod types;

pub use client::OpenRouterClient;
pub use error::OpenRouterError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> OpenRouterClient {
        OpenRouterClient::new(
            "test-api-key",
            mock_server.uri(),
            "test-model",
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "gen-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Hello! How can I help you?"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 15,
                "total_tokens": 25
            }
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_json(serde_json::json!({
                "model": "test-model",
                "messages": [{ "role": "user", "content": "Hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.complete("Hello").await;

        assert_eq!(result.unwrap(), "Hello! How can I help you?");
    }

    #[tokio::test]
    async fn test_with_model_keeps_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_json(serde_json::json!({
                "model": "other-model",
                "messages": [{ "role": "user", "content": "Hi" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "From other model" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).with_model("other-model");
        assert_eq!(client.model(), "other-model");
        assert_eq!(client.complete("Hi").await.unwrap(), "From other model");
    }

    #[tokio::test]
    async fn test_chat_empty_response() {
        let mock_server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "gen-123",
            "model": "test-model",
            "choices": [],
            "usage": null
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.complete("Hello").await;
        assert!(matches!(result, Err(OpenRouterError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_chat_null_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.complete("Hello").await;
        assert!(matches!(result, Err(OpenRouterError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_chat_unexpected_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.complete("Hello").await;
        assert!(matches!(result, Err(OpenRouterError::Json(_))));
    }

    #[tokio::test]
    async fn test_chat_rate_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.complete("Hello").await;
        assert!(matches!(result, Err(OpenRouterError::RateLimit)));
    }

    #[tokio::test]
    async fn test_chat_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.complete("Hello").await;
        assert!(matches!(result, Err(OpenRouterError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_chat_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        match client.complete("Hello").await {
            Err(OpenRouterError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_structured_error_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 400, "message": "openai/gpt-5 is not a valid model ID" }
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        match client.complete("Hello").await {
            Err(OpenRouterError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "openai/gpt-5 is not a valid model ID");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insufficient_credits() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(402))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(matches!(
            client.complete("Hello").await,
            Err(OpenRouterError::InsufficientCredits)
        ));
    }

    #[tokio::test]
    async fn test_provider_error_in_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "gen-9",
                "choices": [],
                "error": { "code": 502, "message": "Provider returned error" }
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        match client.complete("Hello").await {
            Err(OpenRouterError::Provider { code, message }) => {
                assert_eq!(code, 502);
                assert_eq!(message, "Provider returned error");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_app_title_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("X-Title", "AI Assistant Pro"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).with_app_title("AI Assistant Pro");
        assert_eq!(client.complete("Hi").await.unwrap(), "ok");
    }

    #[test]
    fn test_user_message_serialization() {
        let json = serde_json::to_value(Message::user("Hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "user", "content": "Hi" }));
    }
}
