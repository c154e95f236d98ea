//! OpenAI-compatible API types
//!
//! These types mirror the OpenAI API format for compatibility.

pub mod chat;
pub mod error;
pub mod json;
pub mod models;

pub use chat::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse,
    ChatCompletionStreamChoice, ChatCompletionStreamResponse, ChatMessage, ChatMessageRole,
    DeltaContent, FinishReason, StopSequence, Usage,
};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use models::{Model as ApiModel, ModelsResponse};
