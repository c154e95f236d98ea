//! OpenAI-compatible provider calls for the fallback chain.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use super::registry::FallbackProvider;
use crate::domain::{DomainError, Message};

/// Sampling temperature sent on every fallback call.
const FALLBACK_TEMPERATURE: f64 = 0.7;

/// Completion token limit sent on every fallback call.
const FALLBACK_MAX_TOKENS: u32 = 2000;

/// A single synchronous call to a provider's chat-completion endpoint.
#[async_trait]
pub trait ProviderCall: Send + Sync + Debug {
    /// Call `provider` with the structured conversation. A non-empty
    /// `model` overrides the provider's default model.
    async fn call(
        &self,
        provider: &FallbackProvider,
        messages: &[Message],
        model: Option<&str>,
    ) -> Result<String, DomainError>;
}

/// Client for any OpenAI-compatible chat completion API.
#[derive(Debug)]
pub struct ProviderClient<C: HttpClientTrait> {
    client: C,
}

impl<C: HttpClientTrait> ProviderClient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn chat_completions_url(provider: &FallbackProvider) -> String {
        format!(
            "{}/chat/completions",
            provider.base_url.trim_end_matches('/')
        )
    }

    fn parse_response(
        provider: &FallbackProvider,
        json: serde_json::Value,
    ) -> Result<String, DomainError> {
        let response: ProviderResponse = serde_json::from_value(json).map_err(|_| {
            DomainError::provider(
                provider.name.as_str(),
                format!("unexpected response format from {}", provider.name),
            )
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                DomainError::provider(
                    provider.name.as_str(),
                    format!("unexpected response format from {}", provider.name),
                )
            })
    }
}

#[async_trait]
impl<C: HttpClientTrait> ProviderCall for ProviderClient<C> {
    async fn call(
        &self,
        provider: &FallbackProvider,
        messages: &[Message],
        model: Option<&str>,
    ) -> Result<String, DomainError> {
        let model = model
            .filter(|m| !m.is_empty())
            .unwrap_or(&provider.model);

        let url = Self::chat_completions_url(provider);
        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": FALLBACK_TEMPERATURE,
            "max_tokens": FALLBACK_MAX_TOKENS,
        });

        let auth_header = format!("Bearer {}", provider.api_key);
        let headers = vec![
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let json = self
            .client
            .post_json(&url, headers, &body)
            .await
            .map_err(|e| match e {
                // Re-attribute transport errors to the provider being tried.
                DomainError::Provider { message, .. } => {
                    DomainError::provider(provider.name.as_str(), message)
                }
                other => other,
            })?;

        Self::parse_response(provider, json)
    }
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    choices: Vec<ProviderChoice>,
}

#[derive(Debug, Deserialize)]
struct ProviderChoice {
    message: ProviderMessage,
}

#[derive(Debug, Deserialize)]
struct ProviderMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use crate::infrastructure::llm::HttpClient;

    fn provider(base_url: &str) -> FallbackProvider {
        FallbackProvider {
            name: "Fallback-1".to_string(),
            base_url: base_url.to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        }
    }

    fn completion_json(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_call_extracts_first_choice_content() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/chat/completions",
            completion_json("Hello from fallback"),
        );
        let provider_client = ProviderClient::new(client);

        let messages = vec![Message::user("Hi")];
        let text = provider_client
            .call(&provider("https://api.openai.com/v1"), &messages, None)
            .await
            .unwrap();

        assert_eq!(text, "Hello from fallback");
    }

    #[tokio::test]
    async fn test_request_model_overrides_provider_default() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({ "model": "gpt-4" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_json("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider_client = ProviderClient::new(HttpClient::new());
        let messages = vec![Message::user("Hi")];

        let text = provider_client
            .call(&provider(&mock_server.uri()), &messages, Some("gpt-4"))
            .await
            .unwrap();

        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_empty_model_falls_back_to_provider_default() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(
                serde_json::json!({ "model": "gpt-3.5-turbo" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_json("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider_client = ProviderClient::new(HttpClient::new());
        let messages = vec![Message::user("Hi")];

        let text = provider_client
            .call(&provider(&mock_server.uri()), &messages, Some(""))
            .await
            .unwrap();

        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_a_provider_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"error":"rate limited"}"#),
            )
            .mount(&mock_server)
            .await;

        let provider_client = ProviderClient::new(HttpClient::new());
        let messages = vec![Message::user("Hi")];

        let err = provider_client
            .call(&provider(&mock_server.uri()), &messages, None)
            .await
            .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("Fallback-1"), "error was: {text}");
        assert!(text.contains("429"), "error was: {text}");
        assert!(text.contains("rate limited"), "error was: {text}");
    }

    #[tokio::test]
    async fn test_missing_choices_is_unexpected_format() {
        let client = MockHttpClient::new().with_response(
            "https://api.openai.com/v1/chat/completions",
            serde_json::json!({ "id": "chatcmpl-123", "choices": [] }),
        );
        let provider_client = ProviderClient::new(client);

        let messages = vec![Message::user("Hi")];
        let err = provider_client
            .call(&provider("https://api.openai.com/v1"), &messages, None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("unexpected response format"));
    }

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let url = ProviderClient::<MockHttpClient>::chat_completions_url(&provider(
            "https://api.groq.com/openai/v1/",
        ));
        assert_eq!(url, "https://api.groq.com/openai/v1/chat/completions");
    }
}
