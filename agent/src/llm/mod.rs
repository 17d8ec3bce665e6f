//! LLM abstraction layer

mod openai;
mod types;

pub use openai::OpenAiClient;
pub use types::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, FunctionCall, FunctionSpec, FunctionTool,
    ToolCall,
};

use async_trait::async_trait;

/// Errors from a chat backend
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API key not set: environment variable {0} is empty")]
    MissingApiKey(String),

    #[error("invalid LLM url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to reach the LLM endpoint: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse LLM response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LLM response contained no choices")]
    EmptyResponse,
}

/// Trait for chat backends that support tool calling
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// One completion over the full message list
    ///
    /// `tools` may be empty, in which case the model answers in text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[FunctionTool],
    ) -> Result<ChatMessage, LlmError>;

    /// Get the model name
    fn model(&self) -> &str;
}
