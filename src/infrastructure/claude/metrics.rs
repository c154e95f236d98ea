//! Metrics decorator for the primary backend.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};

use crate::domain::{CompletionBackend, DomainError, InvokeOptions};

/// Records request, success, and failure counters plus call latency for
/// the wrapped backend via the `metrics` facade.
#[derive(Debug)]
pub struct MeteredBackend {
    inner: Arc<dyn CompletionBackend>,
}

impl MeteredBackend {
    pub fn new(inner: Arc<dyn CompletionBackend>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CompletionBackend for MeteredBackend {
    async fn complete(&self, prompt: &str, options: &InvokeOptions) -> Result<String, DomainError> {
        let backend = self.inner.backend_name().to_string();
        let start = Instant::now();

        let result = self.inner.complete(prompt, options).await;

        counter!("backend_requests_total", "backend" => backend.clone()).increment(1);
        histogram!("backend_request_duration_seconds", "backend" => backend.clone())
            .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(_) => counter!("backend_requests_succeeded", "backend" => backend).increment(1),
            Err(_) => counter!("backend_requests_failed", "backend" => backend).increment(1),
        }

        result
    }

    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }
}
