//! Fallback provider infrastructure: registry, HTTP client, and the
//! OpenAI-compatible call implementation.

mod http_client;
mod openai;
mod registry;

pub use http_client::{HttpClient, HttpClientTrait, DEFAULT_PROVIDER_TIMEOUT};
pub use openai::{ProviderCall, ProviderClient};
pub use registry::{FallbackProvider, ProviderRegistry};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
