use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The primary code-assistant backend failed (spawn error or non-zero exit).
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// A fallback provider call failed (network, timeout, non-2xx, bad shape).
    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    /// Every configured backend failed; carries the last failure's detail.
    #[error("all providers failed, last error: {last}")]
    Exhausted { last: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn exhausted(last: impl Into<String>) -> Self {
        Self::Exhausted { last: last.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error() {
        let error = DomainError::backend("claude execution failed: exit status 1");
        assert_eq!(
            error.to_string(),
            "Backend error: claude execution failed: exit status 1"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("Fallback-1", "API returned status 429");
        assert_eq!(
            error.to_string(),
            "Provider error: Fallback-1 - API returned status 429"
        );
    }

    #[test]
    fn test_exhausted_carries_last_detail() {
        let error = DomainError::exhausted("Provider error: Fallback-2 - timeout");
        assert!(error.to_string().contains("Fallback-2"));
        assert!(error.to_string().starts_with("all providers failed"));
    }
}
