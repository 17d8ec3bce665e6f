//! OpenAPI to tool conversion
//!
//! [`SpecTransformer`] walks every path and method of an OpenAPI document,
//! binds each operation to a handler by `operationId` and emits one
//! [`ToolDefinition`] per bound operation. Operations without an id or
//! without a handler are skipped with a warning.

pub mod schema;

pub use schema::{
    clean_schema, extract_input_schema, InputSchema, RefResolver, SchemaError, MAX_REF_DEPTH,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::{HandlerMap, ToolDefinition};

/// Method keys considered operations; anything else under a path is ignored
pub const HTTP_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// What to do when two operations share an `operationId`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Later operation replaces the earlier one
    #[default]
    Override,
    /// Fail the transform
    Reject,
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("duplicate operationId '{operation_id}' at {first} and {second}")]
    DuplicateOperation {
        operation_id: String,
        first: String,
        second: String,
    },

    #[error("schema error in {location}: {source}")]
    Schema {
        location: String,
        #[source]
        source: SchemaError,
    },
}

/// Converts an OpenAPI document into tool definitions
#[derive(Debug, Clone, Copy)]
pub struct SpecTransformer<'a> {
    document: &'a Value,
    duplicate_policy: DuplicatePolicy,
}

impl<'a> SpecTransformer<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self {
            document,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Build a tool for every operation that has a handler
    ///
    /// Output order follows first appearance of each `operationId`; an
    /// overriding duplicate keeps the slot of the operation it replaces.
    pub fn transform(&self, handlers: &HandlerMap) -> Result<Vec<ToolDefinition>, TransformError> {
        let resolver = RefResolver::new(self.document);
        let mut tools: Vec<(String, ToolDefinition)> = Vec::new();

        let Some(paths) = self.document.get("paths").and_then(Value::as_object) else {
            tracing::warn!("OpenAPI document has no paths");
            return Ok(Vec::new());
        };

        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };

            for (method, operation) in item {
                let method = method.to_lowercase();
                if !HTTP_METHODS.contains(&method.as_str()) {
                    continue;
                }
                let location = format!("{} {}", method.to_uppercase(), path);

                let Some(operation_id) = operation.get("operationId").and_then(Value::as_str)
                else {
                    tracing::warn!("Skipping {}: no operationId", location);
                    continue;
                };

                let Some(handler) = handlers.get(operation_id) else {
                    tracing::warn!("No handler found for operation: {}", operation_id);
                    continue;
                };

                let description = operation
                    .get("summary")
                    .and_then(Value::as_str)
                    .or_else(|| operation.get("description").and_then(Value::as_str))
                    .unwrap_or("");

                let input_schema = extract_input_schema(operation, &resolver).map_err(|source| {
                    TransformError::Schema {
                        location: location.clone(),
                        source,
                    }
                })?;

                let dangling = input_schema.dangling_required();
                if !dangling.is_empty() {
                    tracing::warn!(
                        "{} requires fields with no schema: {}",
                        operation_id,
                        dangling.join(", ")
                    );
                }

                let tool = ToolDefinition::new(
                    operation_id,
                    description,
                    input_schema,
                    handler.clone(),
                );

                match tools.iter_mut().find(|(_, t)| t.name() == operation_id) {
                    Some(slot) => match self.duplicate_policy {
                        DuplicatePolicy::Override => {
                            tracing::warn!(
                                "Operation {} at {} overrides {}",
                                operation_id,
                                location,
                                slot.0
                            );
                            *slot = (location, tool);
                        }
                        DuplicatePolicy::Reject => {
                            return Err(TransformError::DuplicateOperation {
                                operation_id: operation_id.to_string(),
                                first: slot.0.clone(),
                                second: location,
                            });
                        }
                    },
                    None => tools.push((location, tool)),
                }
            }
        }

        tracing::info!("Transformed OpenAPI document into {} tools", tools.len());
        Ok(tools.into_iter().map(|(_, tool)| tool).collect())
    }
}
