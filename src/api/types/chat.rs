//! OpenAI-compatible chat completion types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{estimate_tokens, InvokeOptions, Message, MessageRole};

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
    Assistant,
}

impl From<ChatMessageRole> for MessageRole {
    fn from(role: ChatMessageRole) -> Self {
        match role {
            ChatMessageRole::System => Self::System,
            ChatMessageRole::User => Self::User,
            ChatMessageRole::Assistant => Self::Assistant,
        }
    }
}

/// A chat message in OpenAI format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,

    #[serde(default)]
    pub content: String,

    /// Name of the participant (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatMessageRole::Assistant,
            content: content.into(),
            name: None,
        }
    }

    pub fn to_domain(&self) -> Message {
        Message {
            role: self.role.into(),
            content: self.content.clone(),
        }
    }
}

/// Stop sequence - can be string or array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequence {
    Single(String),
    Multiple(Vec<String>),
}

/// Chat completion request (OpenAI format)
///
/// Sampling fields are accepted for wire compatibility; the primary
/// backend has no use for them and fallback calls use fixed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,

    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    /// Whether to stream responses
    #[serde(default)]
    pub stream: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopSequence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<HashMap<String, i32>>,

    /// User identifier for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Backend-specific options, decoded into the typed option bag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude_options: Option<InvokeOptions>,
}

/// Reason for completion finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    /// Estimate usage from the flattened prompt and the completion text.
    pub fn from_texts(prompt: &str, completion: &str) -> Self {
        let prompt_tokens = estimate_tokens(prompt);
        let completion_tokens = estimate_tokens(completion);

        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// A choice in the chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: FinishReason,
}

/// Chat completion response (OpenAI format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Usage,
}

impl ChatCompletionResponse {
    /// Wrap a completed response text. The model is echoed back verbatim,
    /// regardless of which backend actually served the request.
    pub fn new(model: &str, request_id: &str, content: String, usage: Usage) -> Self {
        Self {
            id: request_id.to_string(),
            object: "chat.completion".to_string(),
            created: chrono::Utc::now().timestamp(),
            model: model.to_string(),
            choices: vec![ChatCompletionChoice {
                index: 0,
                message: ChatMessage::assistant(content),
                finish_reason: FinishReason::Stop,
            }],
            usage,
        }
    }
}

/// Delta content for streaming
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeltaContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ChatMessageRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A choice in a streaming response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionStreamChoice {
    pub index: u32,
    pub delta: DeltaContent,
    pub finish_reason: Option<FinishReason>,
}

/// Streaming chat completion response chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionStreamResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatCompletionStreamChoice>,
}

impl ChatCompletionStreamResponse {
    fn chunk(model: &str, request_id: &str, choice: ChatCompletionStreamChoice) -> Self {
        Self {
            id: request_id.to_string(),
            object: "chat.completion.chunk".to_string(),
            created: chrono::Utc::now().timestamp(),
            model: model.to_string(),
            choices: vec![choice],
        }
    }

    /// Create the initial chunk announcing the assistant role.
    pub fn initial(model: &str, request_id: &str) -> Self {
        Self::chunk(
            model,
            request_id,
            ChatCompletionStreamChoice {
                index: 0,
                delta: DeltaContent {
                    role: Some(ChatMessageRole::Assistant),
                    content: None,
                },
                finish_reason: None,
            },
        )
    }

    /// Create a content chunk
    pub fn content(model: &str, request_id: &str, content: &str) -> Self {
        Self::chunk(
            model,
            request_id,
            ChatCompletionStreamChoice {
                index: 0,
                delta: DeltaContent {
                    role: None,
                    content: Some(content.to_string()),
                },
                finish_reason: None,
            },
        )
    }

    /// Create the terminal chunk with finish reason "stop".
    pub fn finish(model: &str, request_id: &str) -> Self {
        Self::chunk(
            model,
            request_id,
            ChatCompletionStreamChoice {
                index: 0,
                delta: DeltaContent::default(),
                finish_reason: Some(FinishReason::Stop),
            },
        )
    }

    /// Whether this chunk carries response content.
    pub fn has_content(&self) -> bool {
        self.choices
            .first()
            .is_some_and(|c| c.delta.content.is_some())
    }
}
