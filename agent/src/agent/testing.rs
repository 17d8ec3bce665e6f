//! Test doubles for driving agents without a network

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::llm::{ChatBackend, ChatMessage, FunctionTool, LlmError};
use crate::openapi::InputSchema;
use crate::tools::{typed_handler, HandlerError, ToolDefinition, ToolRegistry};

/// Chat backend that replays canned replies and records every request
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<ChatMessage>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    tools_seen: Mutex<Vec<Vec<FunctionTool>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<ChatMessage>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    /// Message lists sent so far, one per completion
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// Tool lists sent so far, one per completion
    pub fn tools_seen(&self) -> Vec<Vec<FunctionTool>> {
        self.tools_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[FunctionTool],
    ) -> Result<ChatMessage, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.tools_seen.lock().unwrap().push(tools.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

#[derive(Deserialize)]
struct EchoParams {
    text: String,
}

/// Registry with a single `echo` tool taking a required `text`
pub fn echo_registry() -> Arc<ToolRegistry> {
    let schema = InputSchema::from_json_schema(&json!({
        "properties": {"text": {"type": "string"}},
        "required": ["text"]
    }));
    let handler = typed_handler(|p: EchoParams| async move {
        Ok::<_, HandlerError>(json!({"echo": p.text}))
    });

    let mut registry = ToolRegistry::new();
    registry.register(ToolDefinition::new("echo", "Echo text", schema, handler));
    Arc::new(registry)
}
