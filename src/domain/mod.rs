//! Domain layer - Core chat types and error taxonomy

pub mod chat;
pub mod error;

pub use chat::{
    estimate_tokens, flatten_conversation, CompletionBackend, CompletionOutcome,
    CompletionSource, InvokeOptions, Message, MessageRole,
};
pub use error::DomainError;
