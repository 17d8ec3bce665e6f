//! Scheduling agent
//!
//! Receives a placed order and books a delivery slot on a simulated
//! calendar. The calendar tools are ordinary registry tools whose input
//! schemas are generated from their parameter structs.

use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{ArgumentDefaults, ToolAgent, DEFAULT_MAX_TOOL_ROUNDS};
use crate::llm::ChatBackend;
use crate::openapi::InputSchema;
use crate::tools::{typed_handler, HandlerError, ToolDefinition, ToolRegistry};

/// Sampling used for the scheduling model
pub const SCHEDULING_TEMPERATURE: f32 = 0.3;
pub const SCHEDULING_MAX_TOKENS: u32 = 400;

/// Minutes from now suggested for delivery (25 prep + 10 travel)
pub const SUGGESTED_DELIVERY_MINUTES: i64 = 35;

pub const SCHEDULING_SYSTEM_PROMPT: &str = "\
You are a pizza delivery scheduling assistant.

Your responsibilities:
1. Receive order details (order_id, prep_time, address, customer_name).
2. Choose a reasonable delivery time (typically prep_time + 10 minutes).
3. Use tools to:
   - check_calendar_availability
   - schedule_delivery
4. Respond with clear delivery time and confirmation.
";

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleDeliveryParams {
    #[schemars(description = "Order ID from pizza system.")]
    pub order_id: String,
    #[schemars(description = "ISO 8601 datetime for delivery.")]
    pub delivery_time: String,
    #[schemars(description = "Delivery address.")]
    pub address: String,
    #[schemars(description = "Customer name.")]
    pub customer_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AvailabilityParams {
    #[schemars(description = "ISO 8601 datetime to check.")]
    pub delivery_time: String,
}

// ============================================================================
// Calendar
// ============================================================================

/// A booked delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledDelivery {
    pub order_id: String,
    pub delivery_time: String,
    pub address: String,
    pub customer_name: String,
    pub status: String,
}

/// In-memory delivery calendar; every slot is available
#[derive(Debug, Default)]
pub struct DeliveryCalendar {
    deliveries: Mutex<BTreeMap<String, ScheduledDelivery>>,
}

impl DeliveryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book (or rebook) the delivery for an order
    pub async fn schedule(&self, params: ScheduleDeliveryParams) -> ScheduledDelivery {
        let delivery = ScheduledDelivery {
            order_id: params.order_id,
            delivery_time: params.delivery_time,
            address: params.address,
            customer_name: params.customer_name,
            status: "scheduled".to_string(),
        };
        tracing::info!(
            "Scheduled delivery for {} at {}",
            delivery.order_id,
            delivery.delivery_time
        );
        self.deliveries
            .lock()
            .await
            .insert(delivery.order_id.clone(), delivery.clone());
        delivery
    }

    pub async fn is_available(&self, _delivery_time: &str) -> bool {
        true
    }

    pub async fn get(&self, order_id: &str) -> Option<ScheduledDelivery> {
        self.deliveries.lock().await.get(order_id).cloned()
    }

    /// All bookings, ordered by order id
    pub async fn deliveries(&self) -> Vec<ScheduledDelivery> {
        self.deliveries.lock().await.values().cloned().collect()
    }
}

/// Registry exposing `schedule_delivery` and `check_calendar_availability`
pub fn calendar_tools(calendar: Arc<DeliveryCalendar>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    let cal = calendar.clone();
    registry.register(ToolDefinition::new(
        "schedule_delivery",
        "Schedule a pizza delivery time.",
        InputSchema::from_json_schema(schema_for!(ScheduleDeliveryParams).as_value()),
        typed_handler(move |params: ScheduleDeliveryParams| {
            let cal = cal.clone();
            async move {
                let delivery = cal.schedule(params).await;
                Ok::<_, HandlerError>(json!({
                    "success": true,
                    "order_id": delivery.order_id,
                    "delivery_time": delivery.delivery_time,
                    "message": "Delivery scheduled successfully.",
                }))
            }
        }),
    ));

    let cal = calendar;
    registry.register(ToolDefinition::new(
        "check_calendar_availability",
        "Check if a given time is available for delivery.",
        InputSchema::from_json_schema(schema_for!(AvailabilityParams).as_value()),
        typed_handler(move |params: AvailabilityParams| {
            let cal = cal.clone();
            async move {
                let available = cal.is_available(&params.delivery_time).await;
                Ok::<_, HandlerError>(json!({
                    "available": available,
                    "time": params.delivery_time,
                    "message": if available {
                        "Time slot is available."
                    } else {
                        "Time slot is taken."
                    },
                }))
            }
        }),
    ));

    registry
}

/// `now + 35 minutes` as an ISO-8601 UTC timestamp
pub fn suggested_delivery_time(now: DateTime<Utc>) -> String {
    (now + Duration::minutes(SUGGESTED_DELIVERY_MINUTES)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Agent
// ============================================================================

/// Books deliveries for orders handed over by the orchestrator
pub struct SchedulingAgent {
    agent: ToolAgent,
    calendar: Arc<DeliveryCalendar>,
}

impl SchedulingAgent {
    /// The backend should be configured with [`SCHEDULING_TEMPERATURE`] and
    /// [`SCHEDULING_MAX_TOKENS`]
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self::with_calendar(backend, Arc::new(DeliveryCalendar::new()))
    }

    pub fn with_calendar(backend: Arc<dyn ChatBackend>, calendar: Arc<DeliveryCalendar>) -> Self {
        let registry = Arc::new(calendar_tools(calendar.clone()));
        Self {
            agent: ToolAgent::new(backend, registry, SCHEDULING_SYSTEM_PROMPT)
                .with_max_tool_rounds(DEFAULT_MAX_TOOL_ROUNDS),
            calendar,
        }
    }

    pub fn calendar(&self) -> &Arc<DeliveryCalendar> {
        &self.calendar
    }

    /// Ask the model to schedule delivery for a placed order
    ///
    /// Tool arguments the model omits are filled from the order itself.
    pub async fn process_order_for_scheduling(
        &mut self,
        order_id: &str,
        pizza_name: &str,
        prep_time: &str,
        address: &str,
        customer_name: &str,
    ) -> Result<String> {
        let delivery_time = suggested_delivery_time(Utc::now());

        let request = format!(
            "A pizza order has been placed.\n\
             - Order ID: {order_id}\n\
             - Pizza: {pizza_name}\n\
             - Prep time: {prep_time}\n\
             - Address: {address}\n\
             - Customer: {customer_name}\n\
             - Suggested delivery time (UTC): {delivery_time}\n\n\
             Please schedule the delivery and confirm the delivery time."
        );

        let defaults = order_defaults(order_id, &delivery_time, address, customer_name);

        tracing::info!("SchedulingAgent <- order {}", order_id);
        self.agent.chat_with_defaults(&request, &defaults).await
    }

    /// Everything booked so far
    pub async fn get_scheduled_deliveries(&self) -> Vec<ScheduledDelivery> {
        self.calendar.deliveries().await
    }

    pub fn reset_conversation(&mut self) {
        self.agent.reset();
    }
}

fn order_defaults(
    order_id: &str,
    delivery_time: &str,
    address: &str,
    customer_name: &str,
) -> ArgumentDefaults {
    let mut schedule = Map::new();
    schedule.insert("order_id".to_string(), Value::from(order_id));
    schedule.insert("delivery_time".to_string(), Value::from(delivery_time));
    schedule.insert("address".to_string(), Value::from(address));
    schedule.insert("customer_name".to_string(), Value::from(customer_name));

    let mut availability = Map::new();
    availability.insert("delivery_time".to_string(), Value::from(delivery_time));

    ArgumentDefaults::from([
        ("schedule_delivery".to_string(), schedule),
        ("check_calendar_availability".to_string(), availability),
    ])
}
