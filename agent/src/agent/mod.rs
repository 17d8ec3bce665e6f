//! Agent module - LLM with tool-calling capabilities
//!
//! This implements the "tool-using agent loop" where:
//! 1. User sends a message
//! 2. LLM receives the conversation along with available tools
//! 3. LLM decides whether to call tools or respond directly
//! 4. If tools are called, each outcome is fed back as a `tool` message
//! 5. Loop continues until LLM responds without tool calls

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::llm::{ChatBackend, ChatMessage, FunctionTool, ToolCall};
use crate::tools::{ToolOutcome, ToolRegistry};

pub mod ordering;
pub mod scheduling;

#[cfg(test)]
pub(crate) mod testing;

pub use ordering::{OrderingAgent, ORDERING_SYSTEM_PROMPT};
pub use scheduling::{DeliveryCalendar, ScheduledDelivery, SchedulingAgent};

/// Default bound on model round-trips that request tools
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 5;

/// Per-tool argument values used when the model leaves a key out
pub type ArgumentDefaults = HashMap<String, Map<String, Value>>;

/// A conversation with a chat backend over a tool registry
pub struct ToolAgent {
    backend: Arc<dyn ChatBackend>,
    registry: Arc<ToolRegistry>,
    tools: Vec<FunctionTool>,
    system_prompt: String,
    history: Vec<ChatMessage>,
    max_tool_rounds: usize,
}

impl ToolAgent {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        registry: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let tools = registry.function_tools();
        Self {
            backend,
            registry,
            tools,
            system_prompt: system_prompt.into(),
            history: Vec::new(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// Get the current model name
    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Conversation so far, without the system prompt
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Clear the conversation
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Send a user message and run tools until the model answers in text
    pub async fn chat(&mut self, user_message: &str) -> Result<String> {
        self.chat_with_defaults(user_message, &ArgumentDefaults::new())
            .await
    }

    /// Like [`chat`](Self::chat), filling missing tool arguments from `defaults`
    pub async fn chat_with_defaults(
        &mut self,
        user_message: &str,
        defaults: &ArgumentDefaults,
    ) -> Result<String> {
        self.history.push(ChatMessage::user(user_message));

        let mut rounds = 0;
        loop {
            let mut messages = Vec::with_capacity(self.history.len() + 1);
            messages.push(ChatMessage::system(self.system_prompt.as_str()));
            messages.extend(self.history.iter().cloned());

            tracing::debug!(
                "Agent round {} ({} messages, {} tools)",
                rounds,
                messages.len(),
                self.tools.len()
            );

            let reply = self
                .backend
                .complete(&messages, &self.tools)
                .await
                .with_context(|| format!("Chat completion failed ({})", self.backend.model()))?;

            if reply.tool_calls.is_empty() {
                tracing::info!("Agent responding without tool calls");
                let text = reply.text().to_string();
                self.history.push(ChatMessage::assistant(text.as_str()));
                return Ok(text);
            }

            if rounds >= self.max_tool_rounds {
                bail!(
                    "Max tool rounds ({}) reached without a final answer",
                    self.max_tool_rounds
                );
            }
            rounds += 1;

            tracing::info!("Agent making {} tool call(s)", reply.tool_calls.len());

            let prepared: Vec<(ToolCall, Result<Value, String>)> = reply
                .tool_calls
                .iter()
                .map(|call| prepare_call(call, defaults))
                .collect();

            self.history.push(ChatMessage::assistant_tool_calls(
                reply.content.clone(),
                prepared.iter().map(|(call, _)| call.clone()).collect(),
            ));

            for (call, args) in prepared {
                let outcome = match args {
                    Ok(args) => self.registry.execute(&call.function.name, args).await,
                    Err(error) => ToolOutcome::failure(&call.function.name, error),
                };
                tracing::debug!(
                    "Tool {} -> {}",
                    call.function.name,
                    if outcome.is_success() { "success" } else { "failure" }
                );
                self.history
                    .push(ChatMessage::tool_result(call.id, outcome.to_message_content()));
            }
        }
    }
}

/// Parse a call's arguments and apply defaults for its tool
///
/// The returned call carries the arguments that will actually be used.
fn prepare_call(call: &ToolCall, defaults: &ArgumentDefaults) -> (ToolCall, Result<Value, String>) {
    let raw = call.function.arguments.trim();
    let parsed: Result<Value, String> = if raw.is_empty() {
        Ok(Value::Object(Map::new()))
    } else {
        serde_json::from_str(raw).map_err(|e| format!("invalid arguments JSON: {}", e))
    };

    let args = match parsed {
        Ok(Value::Object(mut map)) => {
            if let Some(tool_defaults) = defaults.get(&call.function.name) {
                for (key, value) in tool_defaults {
                    map.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
            Ok(Value::Object(map))
        }
        other => other,
    };

    let mut call = call.clone();
    if let Ok(args) = &args {
        call.function.arguments = args.to_string();
    }
    (call, args)
}
