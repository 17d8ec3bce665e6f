//! OpenAI-compatible chat-completions client

use async_trait::async_trait;

use super::types::{ChatMessage, ChatRequest, ChatResponse, FunctionTool};
use super::{ChatBackend, LlmError};

const DEFAULT_TEMPERATURE: f32 = 0.4;
const DEFAULT_MAX_TOKENS: u32 = 700;

/// Chat client speaking the `/chat/completions` protocol
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a client for `url` (e.g. `https://api.openai.com/v1`)
    pub fn new(url: &str, model: &str, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let parsed = url::Url::parse(url)?;

        Ok(Self {
            http_client: reqwest::Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Create a client reading the API key from `api_key_env`
    pub fn from_env(url: &str, model: &str, api_key_env: &str) -> Result<Self, LlmError> {
        let api_key = std::env::var(api_key_env).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(api_key_env.to_string()));
        }
        Self::new(url, model, api_key)
    }

    /// Override sampling settings
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[FunctionTool],
    ) -> Result<ChatMessage, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            tools,
            tool_choice: (!tools.is_empty()).then_some("auto"),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            "Chat request: model={} messages={} tools={}",
            self.model,
            messages.len(),
            tools.len()
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let raw_body = response.text().await?;
        let body: ChatResponse = serde_json::from_str(&raw_body)?;

        let message = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(LlmError::EmptyResponse)?;

        tracing::debug!(
            "Chat response: content length={} tool calls={}",
            message.text().len(),
            message.tool_calls.len()
        );

        Ok(message)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
