//! Response cache decorator for the primary backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::domain::{CompletionBackend, DomainError, InvokeOptions};

const CACHE_MAX_CAPACITY: u64 = 1024;

/// Caches successful completions keyed by the full prompt, with a TTL.
/// Failures are never cached.
pub struct CachedBackend {
    inner: Arc<dyn CompletionBackend>,
    cache: Cache<String, String>,
}

impl CachedBackend {
    pub fn new(inner: Arc<dyn CompletionBackend>, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_MAX_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }
}

impl fmt::Debug for CachedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedBackend")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionBackend for CachedBackend {
    async fn complete(&self, prompt: &str, options: &InvokeOptions) -> Result<String, DomainError> {
        if let Some(hit) = self.cache.get(prompt).await {
            debug!(chars = hit.len(), "Serving completion from cache");
            return Ok(hit);
        }

        let response = self.inner.complete(prompt, options).await?;
        self.cache
            .insert(prompt.to_string(), response.clone())
            .await;

        Ok(response)
    }

    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }
}
