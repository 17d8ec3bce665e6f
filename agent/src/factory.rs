//! Tool server assembly
//!
//! Loads the backend's OpenAPI document, binds it to the handler set and
//! returns a populated [`ToolRegistry`].

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::backend::{create_handlers, PizzaApiClient};
use crate::llm::FunctionTool;
use crate::openapi::{DuplicatePolicy, SpecTransformer};
use crate::tools::{HandlerMap, ToolRegistry};

/// Read an OpenAPI document from disk
pub fn load_openapi_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OpenAPI document {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse OpenAPI document {}", path.display()))
}

/// Load the document from `spec_path`, or fetch it from the backend
pub async fn load_openapi_document(
    spec_path: Option<&Path>,
    client: &PizzaApiClient,
) -> Result<Value> {
    match spec_path {
        Some(path) => {
            tracing::info!("Loading OpenAPI document from {}", path.display());
            load_openapi_file(path)
        }
        None => {
            tracing::info!("Fetching OpenAPI document from {}", client.base_url());
            client
                .fetch_openapi()
                .await
                .context("Failed to fetch OpenAPI document from the backend")
        }
    }
}

/// Transform `document` against `handlers` into a registry
pub fn build_registry(
    document: &Value,
    handlers: &HandlerMap,
    policy: DuplicatePolicy,
) -> Result<ToolRegistry> {
    let tools = SpecTransformer::new(document)
        .with_duplicate_policy(policy)
        .transform(handlers)
        .context("Failed to generate tools from OpenAPI document")?;

    let mut registry = ToolRegistry::new();
    registry.register_tools(tools);
    tracing::info!(
        "Registered {} tools: {}",
        registry.len(),
        registry.names().join(", ")
    );
    Ok(registry)
}

/// Full pipeline: document, handlers, transform, register
pub async fn create_pizza_tools(
    client: PizzaApiClient,
    spec_path: Option<&Path>,
    policy: DuplicatePolicy,
) -> Result<ToolRegistry> {
    let document = load_openapi_document(spec_path, &client).await?;
    let handlers = create_handlers(client);
    build_registry(&document, &handlers, policy)
}

/// Function-calling view of the registry
pub fn format_tools_for_llm(registry: &ToolRegistry) -> Vec<FunctionTool> {
    registry.function_tools()
}

/// Human-readable listing: name, description and arguments per tool
pub fn describe_tools(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for spec in registry.list_tools() {
        out.push_str(&format!("{}\n", spec.name));
        if !spec.description.is_empty() {
            out.push_str(&format!("  {}\n", spec.description));
        }
        for (name, prop) in &spec.input_schema.properties {
            let ty = prop.get("type").and_then(Value::as_str).unwrap_or("any");
            let marker = if spec.input_schema.required.contains(name) {
                " (required)"
            } else {
                ""
            };
            out.push_str(&format!("    - {}: {}{}\n", name, ty, marker));
        }
    }
    out
}
