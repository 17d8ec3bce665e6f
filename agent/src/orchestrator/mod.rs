//! Order-to-delivery workflow
//!
//! Connects the ordering agent to the scheduling agent: the user's request
//! goes to the ordering agent, the order id is read out of its reply and
//! the scheduling agent books the delivery.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::agent::{OrderingAgent, SchedulingAgent};

/// Prep time handed to the scheduling agent
pub const DEFAULT_PREP_TIME: &str = "25 minutes";

/// Pizza name handed to the scheduling agent; the reply text is not parsed
/// for the exact pizza
const UNKNOWN_PIZZA: &str = "pizza";

static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ORD[A-Z0-9]{4,}").expect("Invalid order id regex"));

/// First order id mentioned in `text`
pub fn extract_order_id(text: &str) -> Option<&str> {
    ORDER_ID_RE.find(text).map(|m| m.as_str())
}

/// Inputs for one workflow run
#[derive(Debug, Clone)]
pub struct WorkflowRequest {
    pub user_request: String,
    pub delivery_address: String,
    pub customer_name: String,
    pub customer_phone: String,
}

impl WorkflowRequest {
    /// The request plus delivery details, as sent to the ordering agent
    pub fn combined_message(&self) -> String {
        format!(
            "{} My address is {}. My name is {}. My phone number is {}.",
            self.user_request, self.delivery_address, self.customer_name, self.customer_phone
        )
    }
}

/// Outcome of a workflow run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowResult {
    Completed {
        order_id: String,
        order_response: String,
        scheduling_response: String,
    },
    Failed {
        error: String,
        order_response: String,
    },
}

impl WorkflowResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Runs the ordering agent then the scheduling agent
pub struct AgentOrchestrator {
    ordering: OrderingAgent,
    scheduling: SchedulingAgent,
}

impl AgentOrchestrator {
    pub fn new(ordering: OrderingAgent, scheduling: SchedulingAgent) -> Self {
        Self {
            ordering,
            scheduling,
        }
    }

    pub fn scheduling_agent(&self) -> &SchedulingAgent {
        &self.scheduling
    }

    /// Place the order and schedule its delivery
    ///
    /// A reply without an order id is a [`WorkflowResult::Failed`]; LLM or
    /// transport errors from either agent are returned as `Err`.
    pub async fn execute_order_workflow(
        &mut self,
        request: &WorkflowRequest,
    ) -> Result<WorkflowResult> {
        tracing::info!("Starting order workflow");

        let combined = request.combined_message();
        let order_response = self.ordering.process_request(&combined).await?;

        let Some(order_id) = extract_order_id(&order_response).map(str::to_string) else {
            tracing::warn!("No order id in ordering agent reply");
            return Ok(WorkflowResult::Failed {
                error: "Could not extract order_id from ordering agent reply.".to_string(),
                order_response,
            });
        };

        tracing::info!("Extracted order_id: {}, handing off to scheduling", order_id);
        let scheduling_response = self
            .scheduling
            .process_order_for_scheduling(
                &order_id,
                UNKNOWN_PIZZA,
                DEFAULT_PREP_TIME,
                &request.delivery_address,
                &request.customer_name,
            )
            .await?;

        Ok(WorkflowResult::Completed {
            order_id,
            order_response,
            scheduling_response,
        })
    }
}
