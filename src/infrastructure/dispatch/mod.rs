//! Fallback dispatcher: primary attempt, then ordered provider fallback.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    flatten_conversation, CompletionBackend, CompletionOutcome, DomainError, InvokeOptions,
    Message,
};
use crate::infrastructure::llm::{ProviderCall, ProviderRegistry};

/// Drives the primary-then-fallback completion chain.
///
/// The primary backend receives the flattened conversation; fallback
/// providers receive the structured message sequence. Providers are tried
/// strictly in configured order, short-circuiting on the first success.
/// No state is shared between in-flight requests.
#[derive(Debug)]
pub struct FallbackDispatcher {
    primary: Arc<dyn CompletionBackend>,
    registry: Arc<ProviderRegistry>,
    providers: Arc<dyn ProviderCall>,
}

impl FallbackDispatcher {
    pub fn new(
        primary: Arc<dyn CompletionBackend>,
        registry: Arc<ProviderRegistry>,
        providers: Arc<dyn ProviderCall>,
    ) -> Self {
        Self {
            primary,
            registry,
            providers,
        }
    }

    /// Resolve a conversation to a completion, or fail once every backend
    /// has been exhausted.
    ///
    /// With no providers configured, a primary failure propagates
    /// unchanged. Otherwise each provider is tried in order with `model`
    /// as an override (empty means the provider's default); the last
    /// failure's detail is carried in the exhaustion error.
    pub async fn dispatch(
        &self,
        messages: &[Message],
        options: &InvokeOptions,
        model: &str,
    ) -> Result<CompletionOutcome, DomainError> {
        let prompt = flatten_conversation(messages);

        debug!(
            backend = self.primary.backend_name(),
            messages = messages.len(),
            "Dispatching completion request"
        );

        let primary_error = match self.primary.complete(&prompt, options).await {
            Ok(text) => return Ok(CompletionOutcome::primary(text)),
            Err(error) => error,
        };

        if self.registry.is_empty() {
            return Err(primary_error);
        }

        warn!(error = %primary_error, "Primary backend failed, attempting fallback");

        let mut last_error = primary_error;

        for (index, provider) in self.registry.providers().iter().enumerate() {
            info!(
                provider = %provider.name,
                attempt = index + 1,
                total = self.registry.len(),
                "Trying fallback provider"
            );

            match self.providers.call(provider, messages, Some(model)).await {
                Ok(text) => {
                    info!(provider = %provider.name, chars = text.len(), "Fallback succeeded");
                    return Ok(CompletionOutcome::fallback(text, provider.name.clone()));
                }
                Err(error) => {
                    warn!(provider = %provider.name, error = %error, "Fallback provider failed");
                    last_error = error;
                }
            }
        }

        Err(DomainError::exhausted(last_error.to_string()))
    }
}
