//! Thin HTTP client boundary around reqwest, trait-backed for mocking.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Request timeout applied to every provider attempt so a hung provider
/// cannot stall the fallback chain.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response-body snippet carried inside an error message.
const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// Trait for HTTP POST operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!(
                    "API returned status {}: {}",
                    status.as_u16(),
                    snippet(&error_body)
                ),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}

fn snippet(body: &str) -> &str {
    if body.len() <= ERROR_BODY_SNIPPET_LEN {
        return body;
    }

    let mut end = ERROR_BODY_SNIPPET_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(snippet(&body).len(), ERROR_BODY_SNIPPET_LEN);
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let body = "é".repeat(300);
        let cut = snippet(&body);
        assert!(cut.len() <= ERROR_BODY_SNIPPET_LEN);
        assert!(body.starts_with(cut));
    }

    #[test]
    fn test_snippet_keeps_short_bodies() {
        assert_eq!(snippet("not found"), "not found");
        assert_eq!(snippet(""), "");
    }
}
