use std::fmt::Debug;

use async_trait::async_trait;

use super::InvokeOptions;
use crate::domain::DomainError;

/// Trait for the primary completion backend.
///
/// Implemented by the CLI invoker and by the decorator wrappers layered
/// around it (retry, cache, metrics). Decorators are transparent: they
/// expose the wrapped backend's name.
#[async_trait]
pub trait CompletionBackend: Send + Sync + Debug {
    /// Send a flattened prompt and return the completed response text.
    async fn complete(&self, prompt: &str, options: &InvokeOptions) -> Result<String, DomainError>;

    /// Name of the underlying backend, for logging and metrics labels.
    fn backend_name(&self) -> &str;
}
