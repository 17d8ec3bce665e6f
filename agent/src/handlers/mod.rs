//! Command handlers module
//!
//! This module contains handler functions for CLI commands.
//! CommandContext provides lazy-loaded resources shared across handlers.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::backend::PizzaApiClient;
use crate::config::AgentFileConfig;
use crate::factory::create_pizza_tools;
use crate::llm::{ChatBackend, OpenAiClient};
use crate::tools::ToolRegistry;

pub mod chat;
pub mod order;
pub mod tools;
pub mod workflow;

pub use chat::run_chat;
pub use order::run_order_wizard;
pub use tools::{run_call_tool, run_smoke, run_tools};
pub use workflow::run_workflow;

// =============================================================================
// CommandContext - shared state with lazy-loading
// =============================================================================

/// Shared context for command handlers with lazy-loaded resources.
///
/// The tool registry needs the OpenAPI document (possibly fetched over
/// HTTP), so it is only built when a command first asks for it.
pub struct CommandContext {
    pub api_url: String,
    pub spec_path: Option<PathBuf>,
    pub llm_url: String,
    pub model: String,
    pub verbose: u8,
    pub file_config: AgentFileConfig,

    /// Lazy-loaded tool registry
    registry: OnceCell<Arc<ToolRegistry>>,
}

impl CommandContext {
    /// Create a new CommandContext from CLI args and file config
    pub fn new(
        api_url: Option<String>,
        spec: Option<String>,
        llm_url: Option<String>,
        model: Option<String>,
        verbose: u8,
        file_config: AgentFileConfig,
    ) -> Result<Self> {
        // Resolve with priority: CLI/env > config file > defaults
        let api_url = api_url.unwrap_or_else(|| file_config.api.base_url.clone());
        let llm_url = llm_url.unwrap_or_else(|| file_config.llm.url.clone());
        let model = model.unwrap_or_else(|| file_config.llm.model.clone());
        let spec_path = match spec {
            Some(raw) => Some(PathBuf::from(
                shellexpand::full(&raw)
                    .with_context(|| format!("Failed to expand spec path '{}'", raw))?
                    .as_ref(),
            )),
            None => file_config.api.expanded_spec_path()?,
        };

        Ok(Self {
            api_url,
            spec_path,
            llm_url,
            model,
            verbose,
            file_config,
            registry: OnceCell::new(),
        })
    }

    /// Check if verbose mode is enabled (any -v flag)
    pub fn is_verbose(&self) -> bool {
        self.verbose >= 1
    }

    /// Create a backend client configured with the context's settings
    pub fn api_client(&self) -> Result<PizzaApiClient> {
        PizzaApiClient::with_timeout(&self.api_url, self.file_config.api.timeout())
            .with_context(|| format!("Invalid backend URL {}", self.api_url))
    }

    /// Get the tool registry, building it on first use
    pub async fn tools(&self) -> Result<Arc<ToolRegistry>> {
        self.registry
            .get_or_try_init(|| async {
                let registry = create_pizza_tools(
                    self.api_client()?,
                    self.spec_path.as_deref(),
                    self.file_config.tools.duplicate_policy,
                )
                .await?;
                Ok::<_, anyhow::Error>(Arc::new(registry))
            })
            .await
            .cloned()
    }

    /// Create a chat backend with the configured sampling
    pub fn chat_backend(&self) -> Result<Arc<dyn ChatBackend>> {
        let llm = &self.file_config.llm;
        self.chat_backend_with(llm.temperature, llm.max_tokens)
    }

    /// Create a chat backend with explicit sampling
    pub fn chat_backend_with(
        &self,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Arc<dyn ChatBackend>> {
        let client = OpenAiClient::from_env(
            &self.llm_url,
            &self.model,
            &self.file_config.llm.api_key_env,
        )?
        .with_sampling(temperature, max_tokens);
        Ok(Arc::new(client))
    }

    /// Resolve system prompt with priority: explicit > config
    pub fn resolve_system_prompt(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.file_config.agent.system_prompt.clone())
    }

    pub fn max_tool_rounds(&self) -> usize {
        self.file_config.agent.max_tool_rounds
    }
}
