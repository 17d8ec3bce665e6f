//! Tool definitions and the registry that executes them
//!
//! A [`ToolDefinition`] pairs an input schema with the handler it delegates
//! to. The [`ToolRegistry`] owns definitions by name and runs them:
//! [`ToolRegistry::execute_tool`] propagates failures as [`ToolError`],
//! while [`ToolRegistry::execute`] folds every outcome into a tagged
//! [`ToolOutcome`] suitable for handing back to a model.

pub mod binding;
pub mod handler;

pub use binding::{bind_arguments, BindingError};
pub use handler::{typed_handler, HandlerError, HandlerMap, ToolHandler};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::llm::FunctionTool;
use crate::openapi::InputSchema;

/// A named, schema-described callable
#[derive(Clone)]
pub struct ToolDefinition {
    name: String,
    description: String,
    input_schema: InputSchema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &InputSchema {
        &self.input_schema
    }

    /// Public view without the handler
    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
        }
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish_non_exhaustive()
    }
}

/// What `list_tools` exposes for each tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

impl ToolSpec {
    /// Wrap for a chat-completions `tools` array
    pub fn to_function_tool(&self) -> FunctionTool {
        FunctionTool::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.to_value(),
        )
    }
}

/// Errors from running a tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    NotFound(String),

    #[error("Invalid arguments for tool '{tool}': {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: BindingError,
    },

    #[error("Tool '{tool}' failed: {source}")]
    Execution {
        tool: String,
        #[source]
        source: HandlerError,
    },
}

impl ToolError {
    /// Name of the tool the error belongs to
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound(tool)
            | Self::InvalidArguments { tool, .. }
            | Self::Execution { tool, .. } => tool,
        }
    }
}

/// Tagged result of a tool call
///
/// A failure is a distinct variant, never an error-shaped success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Success { result: Value },
    Failure { tool: String, error: String },
}

impl ToolOutcome {
    pub fn failure(tool: impl Into<String>, error: impl fmt::Display) -> Self {
        Self::Failure {
            tool: tool.into(),
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The result value, if the call succeeded
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Success { result } => Some(result),
            Self::Failure { .. } => None,
        }
    }

    /// JSON text handed back to a model as the tool message content
    pub fn to_message_content(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"failure","error":"unserializable outcome: {}"}}"#, e)
        })
    }
}

impl From<Result<Value, ToolError>> for ToolOutcome {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(result) => Self::Success { result },
            Err(e) => {
                let tool = e.tool_name().to_string();
                Self::failure(tool, e)
            }
        }
    }
}

/// Name-keyed store of tool definitions
///
/// Registration order is preserved for listing; re-registering a name
/// replaces the definition in place.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one definition; last write wins
    pub fn register(&mut self, tool: ToolDefinition) {
        match self.index.get(tool.name()) {
            Some(&slot) => {
                tracing::debug!("Replacing tool {}", tool.name());
                self.tools[slot] = tool;
            }
            None => {
                self.index.insert(tool.name().to_string(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn register_tools(&mut self, tools: impl IntoIterator<Item = ToolDefinition>) {
        for tool in tools {
            self.register(tool);
        }
    }

    pub fn list_tools(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(ToolDefinition::spec).collect()
    }

    /// Function-calling view of every tool
    pub fn function_tools(&self) -> Vec<FunctionTool> {
        self.list_tools()
            .iter()
            .map(ToolSpec::to_function_tool)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolDefinition::name).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool, propagating any failure
    pub async fn execute_tool(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        let args = bind_arguments(tool.input_schema(), args).map_err(|source| {
            ToolError::InvalidArguments {
                tool: name.to_string(),
                source,
            }
        })?;

        tracing::info!("Executing tool: {}", name);
        tool.handler
            .call(args)
            .await
            .map_err(|source| ToolError::Execution {
                tool: name.to_string(),
                source,
            })
    }

    /// Run a tool, folding failures into [`ToolOutcome::Failure`]
    pub async fn execute(&self, name: &str, args: Value) -> ToolOutcome {
        let result = self.execute_tool(name, args).await;
        if let Err(e) = &result {
            tracing::warn!("{}", e);
        }
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct EchoParams {
        text: String,
    }

    fn echo_tool(name: &str) -> ToolDefinition {
        let schema = InputSchema::from_json_schema(&json!({
            "properties": {"text": {"type": "string"}},
            "required": ["text"]
        }));
        let handler = typed_handler(|p: EchoParams| async move {
            Ok::<_, HandlerError>(json!({"echo": p.text}))
        });
        ToolDefinition::new(name, "Echo the input", schema, handler)
    }

    fn failing_tool(name: &str) -> ToolDefinition {
        let handler = typed_handler(|_: serde_json::Map<String, Value>| async move {
            Err::<Value, _>(HandlerError::from("backend unreachable"))
        });
        ToolDefinition::new(name, "Always fails", InputSchema::default(), handler)
    }

    #[tokio::test]
    async fn test_execute_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo"));

        let result = registry
            .execute_tool("echo", json!({"text": "hi"}))
            .await
            .unwrap();
        assert_eq!(result, json!({"echo": "hi"}));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let registry = ToolRegistry::new();

        let err = registry.execute_tool("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref n) if n == "nope"));

        let outcome = registry.execute("nope", json!({})).await;
        assert!(!outcome.is_success());
        assert_eq!(
            outcome,
            ToolOutcome::Failure {
                tool: "nope".to_string(),
                error: "Tool 'nope' not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_arguments_rejected_before_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo"));

        let err = registry.execute_tool("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_handler_failure_becomes_failure_outcome() {
        let mut registry = ToolRegistry::new();
        registry.register(failing_tool("broken"));

        let outcome = registry.execute("broken", Value::Null).await;
        match outcome {
            ToolOutcome::Failure { tool, error } => {
                assert_eq!(tool, "broken");
                assert!(error.contains("backend unreachable"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whole_float_reaches_typed_integer_handler() {
        #[derive(Deserialize)]
        struct PizzaParams {
            pizza_id: u32,
        }

        let schema = InputSchema::from_json_schema(&json!({
            "properties": {"pizza_id": {"type": "integer"}},
            "required": ["pizza_id"]
        }));
        let handler = typed_handler(|p: PizzaParams| async move {
            Ok::<_, HandlerError>(json!({"pizza_id": p.pizza_id}))
        });
        let mut registry = ToolRegistry::new();
        registry.register(ToolDefinition::new("pick", "Pick a pizza", schema, handler));

        let result = registry
            .execute_tool("pick", json!({"pizza_id": 1.0}))
            .await
            .unwrap();
        assert_eq!(result, json!({"pizza_id": 1}));
    }

    #[test]
    fn test_last_registration_wins_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("a"));
        registry.register(echo_tool("b"));
        registry.register(failing_tool("a"));

        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().description(), "Always fails");
    }

    #[test]
    fn test_list_tools_hides_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo"));

        let listed = serde_json::to_value(registry.list_tools()).unwrap();
        assert_eq!(listed[0]["name"], "echo");
        assert_eq!(listed[0]["inputSchema"]["required"], json!(["text"]));
        assert!(listed[0].get("handler").is_none());
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let ok = ToolOutcome::Success { result: json!([1]) };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "result": [1]})
        );
    }
}
