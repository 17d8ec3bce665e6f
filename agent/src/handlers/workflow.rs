//! Workflow command handler
//!
//! Ordering agent, then scheduling agent, with the combined result printed
//! as JSON.

use anyhow::Result;

use super::CommandContext;
use crate::agent::scheduling::{SCHEDULING_MAX_TOKENS, SCHEDULING_TEMPERATURE};
use crate::agent::{OrderingAgent, SchedulingAgent};
use crate::orchestrator::{AgentOrchestrator, WorkflowRequest};

/// Handle the `workflow` command
pub async fn run_workflow(ctx: &CommandContext, request: WorkflowRequest) -> Result<()> {
    let registry = ctx.tools().await?;

    let ordering = OrderingAgent::with_options(
        ctx.chat_backend()?,
        registry,
        ctx.resolve_system_prompt(None),
        ctx.max_tool_rounds(),
    );
    let scheduling =
        SchedulingAgent::new(ctx.chat_backend_with(SCHEDULING_TEMPERATURE, SCHEDULING_MAX_TOKENS)?);

    let mut orchestrator = AgentOrchestrator::new(ordering, scheduling);

    println!("User -> OrderingAgent: {}\n", request.combined_message());
    let result = orchestrator.execute_order_workflow(&request).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if ctx.is_verbose() {
        for delivery in orchestrator.scheduling_agent().get_scheduled_deliveries().await {
            println!(
                "Scheduled: {} at {} ({})",
                delivery.order_id, delivery.delivery_time, delivery.address
            );
        }
    }

    if !result.is_completed() {
        anyhow::bail!("Workflow did not complete");
    }
    Ok(())
}
