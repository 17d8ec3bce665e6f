//! Ordering agent
//!
//! Understands natural-language pizza orders and drives the backend tools
//! (`listPizzas`, `placeOrder`, `listOrders`, `trackOrder`).

use anyhow::Result;
use std::sync::Arc;

use super::{ToolAgent, DEFAULT_MAX_TOOL_ROUNDS};
use crate::llm::ChatBackend;
use crate::tools::ToolRegistry;

pub const ORDERING_SYSTEM_PROMPT: &str = "\
You are a helpful pizza ordering assistant for Mission-Pizza.

Your responsibilities:
1. Understand customer's pizza order requests.
2. Ask for missing details (size, address, name, phone) if needed.
3. Use tools to:
   - listPizzas: see available pizzas
   - placeOrder: place the customer's order
   - listOrders / trackOrder: check existing orders
4. Always confirm details before placing an order.
5. Reply clearly with order id, total price and estimated delivery time.
";

/// Conversational front end for placing and tracking orders
pub struct OrderingAgent {
    agent: ToolAgent,
}

impl OrderingAgent {
    pub fn new(backend: Arc<dyn ChatBackend>, registry: Arc<ToolRegistry>) -> Self {
        Self::with_options(backend, registry, None, DEFAULT_MAX_TOOL_ROUNDS)
    }

    /// Create with an optional system prompt override
    pub fn with_options(
        backend: Arc<dyn ChatBackend>,
        registry: Arc<ToolRegistry>,
        system_prompt: Option<String>,
        max_tool_rounds: usize,
    ) -> Self {
        let prompt = system_prompt.unwrap_or_else(|| ORDERING_SYSTEM_PROMPT.to_string());
        Self {
            agent: ToolAgent::new(backend, registry, prompt).with_max_tool_rounds(max_tool_rounds),
        }
    }

    /// Handle one user message and return the agent's reply
    pub async fn process_request(&mut self, user_message: &str) -> Result<String> {
        tracing::info!("OrderingAgent <- {}", user_message);
        let reply = self.agent.chat(user_message).await?;
        tracing::info!("OrderingAgent -> {} chars", reply.len());
        Ok(reply)
    }

    /// Clear history for a fresh interaction
    pub fn reset_conversation(&mut self) {
        self.agent.reset();
    }

    pub fn model(&self) -> &str {
        self.agent.model()
    }

    pub fn history_len(&self) -> usize {
        self.agent.history().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{echo_registry, ScriptedBackend};
    use crate::llm::{ChatMessage, ToolCall};

    #[tokio::test]
    async fn test_uses_registry_tools_and_prompt() {
        let backend = ScriptedBackend::new(vec![
            ChatMessage::assistant_tool_calls(
                Some("Let me check.".to_string()),
                vec![ToolCall::new("c1", "echo", r#"{"text":"menu"}"#)],
            ),
            ChatMessage::assistant("We have Margherita."),
        ]);
        let mut agent = OrderingAgent::new(backend.clone(), echo_registry());

        let reply = agent.process_request("What pizzas do you have?").await.unwrap();
        assert_eq!(reply, "We have Margherita.");

        let tools = backend.tools_seen();
        assert_eq!(tools[0].len(), 1);
        assert_eq!(tools[0][0].function.name, "echo");

        let first_request = &backend.requests()[0];
        assert!(first_request[0].text().contains("Mission-Pizza"));
    }

    #[tokio::test]
    async fn test_reset_conversation() {
        let backend = ScriptedBackend::new(vec![ChatMessage::assistant("hi")]);
        let mut agent = OrderingAgent::new(backend, echo_registry());

        agent.process_request("hello").await.unwrap();
        assert_eq!(agent.history_len(), 2);

        agent.reset_conversation();
        assert_eq!(agent.history_len(), 0);
    }

    #[tokio::test]
    async fn test_prompt_override() {
        let backend = ScriptedBackend::new(vec![ChatMessage::assistant("ok")]);
        let mut agent = OrderingAgent::with_options(
            backend.clone(),
            echo_registry(),
            Some("custom".to_string()),
            1,
        );

        agent.process_request("x").await.unwrap();
        assert_eq!(backend.requests()[0][0].text(), "custom");
    }
}
