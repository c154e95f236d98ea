//! Primary backend infrastructure: the CLI client and its decorator
//! wrappers. Decorators implement the same `CompletionBackend` trait and
//! are composed explicitly at startup.

mod cache;
mod client;
mod metrics;
mod retry;

pub use cache::CachedBackend;
pub use client::ClaudeClient;
pub use metrics::MeteredBackend;
pub use retry::RetryingBackend;
