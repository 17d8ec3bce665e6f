//! Handler set for the backend operations
//!
//! One handler per `operationId` the backend's OpenAPI document declares
//! and the tools expose. Each parses its arguments into a typed struct and
//! makes a single request. `placeOrder` binds straight to the backend's
//! `OrderRequest`, so its `quantity` default matches the server's.

use serde::Deserialize;
use std::sync::Arc;

use pizza_common::OrderRequest;

use super::client::PizzaApiClient;
use crate::tools::{typed_handler, HandlerMap};

/// Operations that have a handler
pub const OPERATION_IDS: [&str; 4] = ["listPizzas", "placeOrder", "listOrders", "trackOrder"];

/// Arguments for `trackOrder`
#[derive(Debug, Deserialize)]
struct TrackOrderParams {
    order_id: String,
}

/// Tools that take no arguments
#[derive(Debug, Deserialize)]
struct NoParams {}

/// Build the handler map for all backend operations
pub fn create_handlers(client: PizzaApiClient) -> HandlerMap {
    let client = Arc::new(client);
    let mut handlers = HandlerMap::new();

    let c = client.clone();
    handlers.insert(
        "listPizzas".to_string(),
        typed_handler(move |_: NoParams| {
            let c = c.clone();
            async move { c.list_pizzas().await }
        }),
    );

    let c = client.clone();
    handlers.insert(
        "placeOrder".to_string(),
        typed_handler(move |order: OrderRequest| {
            let c = c.clone();
            async move {
                tracing::info!(
                    "Placing order: pizza {} x{} ({})",
                    order.pizza_id,
                    order.quantity,
                    order.size
                );
                c.place_order(&order).await
            }
        }),
    );

    let c = client.clone();
    handlers.insert(
        "listOrders".to_string(),
        typed_handler(move |_: NoParams| {
            let c = c.clone();
            async move { c.list_orders().await }
        }),
    );

    let c = client;
    handlers.insert(
        "trackOrder".to_string(),
        typed_handler(move |p: TrackOrderParams| {
            let c = c.clone();
            async move { c.track_order(&p.order_id).await }
        }),
    );

    handlers
}
