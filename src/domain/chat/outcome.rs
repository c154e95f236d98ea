use std::fmt;

/// Identifies which backend produced a completion. Used for internal
/// logging only; never part of the external response schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSource {
    /// The primary code-assistant backend.
    Primary,
    /// A fallback provider, by configured name.
    Fallback(String),
}

impl fmt::Display for CompletionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "claude"),
            Self::Fallback(name) => write!(f, "{name}"),
        }
    }
}

/// A winning completion and where it came from.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub text: String,
    pub source: CompletionSource,
}

impl CompletionOutcome {
    pub fn primary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: CompletionSource::Primary,
        }
    }

    pub fn fallback(text: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: CompletionSource::Fallback(provider.into()),
        }
    }
}
