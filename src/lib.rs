//! Claude Gateway
//!
//! An OpenAI-compatible chat completion server backed by the Claude Code
//! CLI, with ordered fallback to OpenAI-compatible HTTP providers:
//! - `POST /v1/chat/completions` with non-streaming and emulated streaming modes
//! - Fallback providers configured via `FALLBACK_API_*` environment variables
//! - Optional retry/cache/metrics wrappers around the primary backend

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::CompletionBackend;
use infrastructure::claude::{CachedBackend, ClaudeClient, MeteredBackend, RetryingBackend};
use infrastructure::dispatch::FallbackDispatcher;
use infrastructure::llm::{HttpClient, ProviderClient, ProviderRegistry};
use tracing::info;

/// Create the application state: the decorated primary backend, the
/// provider registry, and the dispatcher wiring them together.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let registry = Arc::new(ProviderRegistry::from_env());

    if registry.is_empty() {
        info!("No fallback providers configured");
    } else {
        info!(providers = ?registry.names(), "Fallback providers configured");
    }

    let primary = build_primary_backend(config);

    let http_client = HttpClient::with_timeout(Duration::from_secs(config.fallback.timeout_secs));
    let provider_client = Arc::new(ProviderClient::new(http_client));

    let dispatcher = Arc::new(FallbackDispatcher::new(primary, registry, provider_client));

    let api_key = std::env::var("API_KEY").ok().filter(|key| !key.is_empty());

    Ok(AppState::new(dispatcher, api_key))
}

/// Compose the primary backend from configuration: metrics around cache
/// around retry around the base CLI client. Disabled wrappers are skipped.
fn build_primary_backend(config: &AppConfig) -> Arc<dyn CompletionBackend> {
    let mut client = ClaudeClient::new(config.claude.binary.as_str());
    if let Some(system_prompt) = &config.claude.system_prompt {
        client = client.with_system_prompt(system_prompt.as_str());
    }

    let mut backend: Arc<dyn CompletionBackend> = Arc::new(client);

    if config.claude.max_retries > 0 {
        info!(
            max_retries = config.claude.max_retries,
            "Retry wrapper enabled for primary backend"
        );
        backend = Arc::new(RetryingBackend::new(
            backend,
            config.claude.max_retries,
            Duration::from_millis(config.claude.retry_delay_ms),
        ));
    }

    if config.claude.cache_ttl_secs > 0 {
        info!(
            ttl_secs = config.claude.cache_ttl_secs,
            "Cache wrapper enabled for primary backend"
        );
        backend = Arc::new(CachedBackend::new(
            backend,
            Duration::from_secs(config.claude.cache_ttl_secs),
        ));
    }

    Arc::new(MeteredBackend::new(backend))
}
