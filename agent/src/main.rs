use anyhow::Result;
use clap::Parser;

use pizza_agent::cli::{Cli, Commands};
use pizza_agent::config::AgentFileConfig;
use pizza_agent::handlers::{self, CommandContext};
use pizza_agent::orchestrator::WorkflowRequest;

#[tokio::main]
async fn main() -> Result<()> {
    pizza_common::init_tracing("pizza_agent")?;

    let cli = Cli::parse();

    // Load config file (CLI args override)
    let file_config = AgentFileConfig::load()?;
    let ctx = CommandContext::new(
        cli.api_url,
        cli.spec,
        cli.llm_url,
        cli.model,
        cli.verbose,
        file_config,
    )?;

    match cli.command {
        Commands::Tools { json } => handlers::run_tools(&ctx, json).await,
        Commands::Call { tool, args } => handlers::run_call_tool(&ctx, &tool, args).await,
        Commands::Smoke => handlers::run_smoke(&ctx).await,
        Commands::Order => handlers::run_order_wizard(&ctx).await,
        Commands::Chat { message, system } => handlers::run_chat(&ctx, message, system).await,
        Commands::Workflow {
            request,
            address,
            name,
            phone,
        } => {
            let request = WorkflowRequest {
                user_request: request,
                delivery_address: address,
                customer_name: name,
                customer_phone: phone,
            };
            handlers::run_workflow(&ctx, request).await
        }
    }
}
