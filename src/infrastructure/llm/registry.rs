//! Fallback provider registry, built once at startup from the environment.

use tracing::info;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// An OpenAI-compatible fallback provider.
#[derive(Debug, Clone)]
pub struct FallbackProvider {
    pub name: String,
    pub base_url: String,
    pub api_key: String,
    /// Default model used when the request does not name one.
    pub model: String,
}

/// Ordered, immutable list of configured fallback providers.
///
/// Built once at process start; the order of the slots defines fallback
/// precedence. Safe to share across concurrent requests without locking.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<FallbackProvider>,
}

impl ProviderRegistry {
    /// Highest provider slot scanned in the environment.
    pub const MAX_SLOTS: usize = 5;

    /// Load providers from `FALLBACK_API_*_{1..5}` environment variables.
    /// A slot is configured when its `FALLBACK_API_KEY_N` is set and
    /// non-empty; name, URL, and model fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load providers through an arbitrary lookup function. Slots are
    /// independent: a missing slot does not stop later ones from loading.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: String| lookup(&key).filter(|value| !value.is_empty());

        let mut providers = Vec::new();

        for slot in 1..=Self::MAX_SLOTS {
            let Some(api_key) = get(format!("FALLBACK_API_KEY_{slot}")) else {
                continue;
            };

            let provider = FallbackProvider {
                name: get(format!("FALLBACK_API_NAME_{slot}"))
                    .unwrap_or_else(|| format!("Fallback-{slot}")),
                base_url: get(format!("FALLBACK_API_URL_{slot}"))
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                api_key,
                model: get(format!("FALLBACK_API_MODEL_{slot}"))
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            };

            info!(
                slot,
                provider = %provider.name,
                base_url = %provider.base_url,
                "Fallback provider configured"
            );

            providers.push(provider);
        }

        Self { providers }
    }

    pub fn providers(&self) -> &[FallbackProvider] {
        &self.providers
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name.as_str()).collect()
    }
}
