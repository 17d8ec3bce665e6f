//! REST API handlers
//!
//! Each handler pulls the order book out of the shared state, calls it, and
//! maps `StoreError` to a status code with an `ErrorBody`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use pizza_common::{ErrorBody, Order, OrderRequest, OrderResponse, Pizza};

use crate::params::StatusQuery;
use crate::repository::StoreError;
use crate::server::AppState;

/// Version reported by the health check, matching the OpenAPI `info.version`
const API_VERSION: &str = "1.0.0";

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

fn error_response(e: StoreError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &e {
        StoreError::PizzaNotFound(_) | StoreError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidQuantity(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    tracing::warn!("Request rejected ({}): {}", status, e);
    (status, Json(ErrorBody::new(e.to_string())))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Mission-Pizza API".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// List all available pizzas
pub async fn list_pizzas(State(state): State<AppState>) -> Json<Vec<Pizza>> {
    Json(state.orders.menu().to_vec())
}

/// Place a new pizza order
pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    state
        .orders
        .place_order(req)
        .await
        .map(|resp| (StatusCode::CREATED, Json(resp)))
        .map_err(error_response)
}

/// List all orders in the system
pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.orders.list_orders().await)
}

/// Track a specific order by ID
pub async fn track_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<Order>> {
    state
        .orders
        .get_order(&order_id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Update order status (for testing)
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Order>> {
    state
        .orders
        .update_status(&order_id, query.status)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Serve the bundled OpenAPI document
pub async fn openapi_document() -> ApiResult<Json<serde_json::Value>> {
    serde_json::from_str(crate::OPENAPI_SPEC)
        .map(Json)
        .map_err(|e| {
            tracing::error!("Bundled OpenAPI document is invalid: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
        })
}
