//! Retry decorator for the primary backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{CompletionBackend, DomainError, InvokeOptions};

/// Retries the wrapped backend with linear backoff. A failing attempt is
/// retried against the same backend; cross-provider fallback stays the
/// dispatcher's job.
#[derive(Debug)]
pub struct RetryingBackend {
    inner: Arc<dyn CompletionBackend>,
    max_retries: u32,
    retry_delay: Duration,
}

impl RetryingBackend {
    pub fn new(inner: Arc<dyn CompletionBackend>, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            retry_delay,
        }
    }
}

#[async_trait]
impl CompletionBackend for RetryingBackend {
    async fn complete(&self, prompt: &str, options: &InvokeOptions) -> Result<String, DomainError> {
        let mut failures = 0;

        loop {
            match self.inner.complete(prompt, options).await {
                Ok(response) => return Ok(response),
                Err(error) => {
                    failures += 1;

                    if failures > self.max_retries {
                        return Err(DomainError::backend(format!(
                            "failed after {failures} attempts: {error}"
                        )));
                    }

                    let delay = self.retry_delay * failures;
                    warn!(
                        attempt = failures,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Backend attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }
}
