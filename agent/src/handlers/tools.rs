//! Tools command handlers
//!
//! List generated tools, call one directly, or smoke-test the backend.

use anyhow::{Context, Result};
use serde_json::Value;

use super::CommandContext;
use crate::factory::{describe_tools, format_tools_for_llm};
use crate::tools::ToolOutcome;

/// Number of menu entries the smoke test prints
const SMOKE_PREVIEW: usize = 3;

/// Handle the `tools` command - list generated tools
pub async fn run_tools(ctx: &CommandContext, json: bool) -> Result<()> {
    let registry = ctx.tools().await?;

    if json {
        let tools = format_tools_for_llm(&registry);
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("No tools generated. Check the OpenAPI document's operationIds.");
        return Ok(());
    }

    println!("=== {} tools ===", registry.len());
    print!("{}", describe_tools(&registry));
    Ok(())
}

/// Handle the `call` command - call a tool directly
pub async fn run_call_tool(
    ctx: &CommandContext,
    tool_name: &str,
    args: Option<String>,
) -> Result<()> {
    let registry = ctx.tools().await?;

    let arguments: Value = match args {
        Some(json) => serde_json::from_str(&json).context("--args must be valid JSON")?,
        None => Value::Null,
    };

    if ctx.is_verbose() {
        println!("Calling tool: {}", tool_name);
        println!("Arguments: {}", serde_json::to_string_pretty(&arguments)?);
        println!();
    }

    let outcome = registry.execute(tool_name, arguments).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let ToolOutcome::Failure { error, .. } = outcome {
        anyhow::bail!("Tool call failed: {}", error);
    }
    Ok(())
}

/// Handle the `smoke` command - list the menu through the generated tool
pub async fn run_smoke(ctx: &CommandContext) -> Result<()> {
    let registry = ctx.tools().await?;
    println!("Tools: {}", registry.names().join(", "));

    let pizzas = registry
        .execute_tool("listPizzas", Value::Null)
        .await
        .context("listPizzas failed")?;

    let pizzas = pizzas.as_array().cloned().unwrap_or_default();
    println!("listPizzas returned {} pizzas", pizzas.len());
    for pizza in pizzas.iter().take(SMOKE_PREVIEW) {
        println!(
            "  {}. {} - {}",
            pizza["id"],
            pizza["name"].as_str().unwrap_or("?"),
            pizza["price"]
        );
    }
    Ok(())
}
