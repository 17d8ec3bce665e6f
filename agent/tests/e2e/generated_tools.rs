//! E2E test: tools generated from the backend's OpenAPI document

use serde_json::json;

use pizza_agent::backend::PizzaApiClient;
use pizza_agent::factory::create_pizza_tools;
use pizza_agent::openapi::DuplicatePolicy;
use pizza_agent::tools::{ToolError, ToolOutcome};

use crate::support::{registry_for, start_backend};

#[tokio::test]
async fn test_tools_from_fetched_document() {
    let base_url = start_backend().await;
    let client = PizzaApiClient::new(&base_url).unwrap();

    let registry = create_pizza_tools(client, None, DuplicatePolicy::Override)
        .await
        .expect("Failed to build tools from /openapi.json");

    // updateOrderStatus has no handler and is dropped
    assert_eq!(
        registry.names(),
        vec!["listPizzas", "placeOrder", "listOrders", "trackOrder"]
    );

    let place = registry.get("placeOrder").unwrap().input_schema();
    assert_eq!(
        place.required,
        vec!["pizza_id", "size", "address", "customer_name", "phone"]
    );
    assert!(registry.get("listPizzas").unwrap().input_schema().required.is_empty());
    assert_eq!(
        registry.get("trackOrder").unwrap().input_schema().required,
        vec!["order_id"]
    );
}

#[tokio::test]
async fn test_list_pizzas() {
    let base_url = start_backend().await;
    let registry = registry_for(&base_url);

    let menu = registry.execute_tool("listPizzas", json!({})).await.unwrap();
    let menu = menu.as_array().unwrap();
    assert_eq!(menu.len(), 5);
    assert_eq!(menu[0]["name"], "Margherita");
    assert_eq!(menu[0]["price"], 300.0);
}

#[tokio::test]
async fn test_place_track_and_list_orders() {
    let base_url = start_backend().await;
    let registry = registry_for(&base_url);

    let placed = registry
        .execute_tool(
            "placeOrder",
            json!({
                "pizza_id": 1,
                "size": "large",
                "quantity": 2,
                "address": "123 Main Street, Hyderabad",
                "customer_name": "Raj",
                "phone": "9876543210"
            }),
        )
        .await
        .unwrap();
    assert_eq!(placed["total_price"], 720.0);
    assert_eq!(placed["status"], "confirmed");
    assert_eq!(placed["prep_time"], "25 minutes");

    let order_id = placed["order_id"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("ORD"));

    let tracked = registry
        .execute_tool("trackOrder", json!({"order_id": order_id}))
        .await
        .unwrap();
    assert_eq!(tracked["pizza_name"], "Margherita");
    assert_eq!(tracked["quantity"], 2);

    let orders = registry.execute_tool("listOrders", json!({})).await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quantity_defaults_to_one() {
    let base_url = start_backend().await;
    let registry = registry_for(&base_url);

    let placed = registry
        .execute_tool(
            "placeOrder",
            json!({
                "pizza_id": 2,
                "size": "small",
                "address": "1 Road",
                "customer_name": "A",
                "phone": "1"
            }),
        )
        .await
        .unwrap();
    assert_eq!(placed["total_price"], 320.0);
}

#[tokio::test]
async fn test_backend_errors_are_failures() {
    let base_url = start_backend().await;
    let registry = registry_for(&base_url);

    let err = registry
        .execute_tool("trackOrder", json!({"order_id": "ORDNOPE"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Execution { .. }));
    assert!(err.to_string().contains("404"));

    let outcome = registry
        .execute(
            "placeOrder",
            json!({
                "pizza_id": 42,
                "size": "medium",
                "address": "1 Road",
                "customer_name": "A",
                "phone": "1"
            }),
        )
        .await;
    match outcome {
        ToolOutcome::Failure { tool, error } => {
            assert_eq!(tool, "placeOrder");
            assert!(error.contains("Pizza not found"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_schema_rejects_bad_arguments_before_request() {
    let base_url = start_backend().await;
    let registry = registry_for(&base_url);

    let err = registry
        .execute_tool(
            "placeOrder",
            json!({
                "pizza_id": 1,
                "size": "huge",
                "address": "1 Road",
                "customer_name": "A",
                "phone": "1"
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments { .. }));

    let orders = registry.execute_tool("listOrders", json!({})).await.unwrap();
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_failure() {
    // nothing listens on the discard port
    let registry = registry_for("http://127.0.0.1:9");

    let outcome = registry.execute("listPizzas", json!({})).await;
    assert!(!outcome.is_success());
}
