//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pizza")]
#[command(about = "Mission-Pizza tools and agents generated from the backend's OpenAPI document")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (default: from .agent.toml or http://localhost:8000)
    #[arg(long, env = "PIZZA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// OpenAPI document to load instead of fetching /openapi.json
    #[arg(long, env = "PIZZA_OPENAPI_SPEC", global = true)]
    pub spec: Option<String>,

    /// Chat-completions endpoint (default: from .agent.toml or https://api.openai.com/v1)
    #[arg(long, env = "PIZZA_LLM_URL", global = true)]
    pub llm_url: Option<String>,

    /// Model to use (default: from .agent.toml or gpt-4o-mini)
    #[arg(short = 'm', long, env = "PIZZA_LLM_MODEL", global = true)]
    pub model: Option<String>,

    /// Increase output detail (-v shows tool arguments and raw results)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tools generated from the OpenAPI document
    Tools {
        /// Print the function-calling JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Call a tool directly
    Call {
        /// Tool name (an operationId)
        tool: String,
        /// Arguments as JSON
        #[arg(long, short)]
        args: Option<String>,
    },
    /// Check that the backend answers through the generated tools
    Smoke,
    /// Step-by-step order wizard (no LLM)
    Order,
    /// Talk to the ordering agent
    Chat {
        /// Message to send (starts interactive if not provided)
        message: Option<String>,
        /// System prompt override
        #[arg(long, short)]
        system: Option<String>,
    },
    /// Place an order with the ordering agent, then schedule its delivery
    Workflow {
        /// What to order, e.g. "I want a large Margherita pizza."
        request: String,
        /// Delivery address
        #[arg(long)]
        address: String,
        /// Customer name
        #[arg(long)]
        name: String,
        /// Customer phone number
        #[arg(long)]
        phone: String,
    },
}
