//! Tests for the order book and the REST routes

#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use pizza_common::{OrderRequest, OrderStatus, Size};

    use crate::repository::{total_price, OrderBook, StoreError};
    use crate::server::{create_router, AppState};

    fn order_request(pizza_id: u32, size: Size, quantity: u32) -> OrderRequest {
        OrderRequest {
            pizza_id,
            size,
            quantity,
            address: "123 Main Street, Hyderabad".to_string(),
            customer_name: "Raj".to_string(),
            phone: "9876543210".to_string(),
        }
    }

    async fn call(
        router: &axum::Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let body = match body {
            Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
            None => Body::empty(),
        };
        let req = builder.body(body).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    // ── Pricing ──

    #[test]
    fn test_total_price_large_quantity_two() {
        assert_eq!(total_price(300.0, Size::Large, 2), 720.0);
    }

    #[test]
    fn test_total_price_rounds_to_cents() {
        assert_eq!(total_price(380.0, Size::Small, 3), 912.0);
        assert_eq!(total_price(333.33, Size::Large, 1), 400.0);
    }

    // ── Order book ──

    #[tokio::test]
    async fn test_place_and_track_order() {
        let book = OrderBook::default();

        let resp = book
            .place_order(order_request(1, Size::Large, 2))
            .await
            .unwrap();
        assert!(resp.order_id.starts_with("ORD"));
        assert_eq!(resp.order_id.len(), 11);
        assert_eq!(resp.status, OrderStatus::Confirmed);
        assert_eq!(resp.prep_time, "25 minutes");
        assert_eq!(resp.total_price, 720.0);

        let order = book.get_order(&resp.order_id).await.unwrap();
        assert_eq!(order.pizza_name, "Margherita");
        assert_eq!(order.quantity, 2);
        assert_eq!(
            (order.estimated_delivery_time - order.created_at).num_minutes(),
            35
        );
    }

    #[tokio::test]
    async fn test_unknown_pizza_rejected() {
        let book = OrderBook::default();
        let err = book
            .place_order(order_request(42, Size::Medium, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PizzaNotFound(42)));
        assert!(book.list_orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_quantity_out_of_range_rejected() {
        let book = OrderBook::default();
        for qty in [0, 11] {
            let err = book
                .place_order(order_request(1, Size::Medium, qty))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidQuantity(q) if q == qty));
        }
    }

    #[tokio::test]
    async fn test_orders_listed_in_creation_order() {
        let book = OrderBook::default();
        let first = book.place_order(order_request(2, Size::Small, 1)).await.unwrap();
        let second = book.place_order(order_request(3, Size::Large, 1)).await.unwrap();

        let ids: Vec<String> = book
            .list_orders()
            .await
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(ids, vec![first.order_id, second.order_id]);
    }

    #[tokio::test]
    async fn test_update_status() {
        let book = OrderBook::default();
        let resp = book.place_order(order_request(1, Size::Small, 1)).await.unwrap();

        let order = book
            .update_status(&resp.order_id, OrderStatus::OutForDelivery)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::OutForDelivery);

        let err = book
            .update_status("ORDMISSING", OrderStatus::Ready)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OrderNotFound(_)));
    }

    // ── Routes ──

    #[tokio::test]
    async fn route_health() {
        let router = create_router(AppState::default());
        let (s, body) = call(&router, "GET", "/", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "Mission-Pizza API");
    }

    #[tokio::test]
    async fn route_list_pizzas() {
        let router = create_router(AppState::default());
        let (s, body) = call(&router, "GET", "/api/pizzas", None).await;
        assert_eq!(s, StatusCode::OK);
        let pizzas = body.as_array().unwrap();
        assert_eq!(pizzas.len(), 5);
        assert_eq!(pizzas[0]["name"], "Margherita");
        assert_eq!(pizzas[0]["price"], 300.0);
    }

    #[tokio::test]
    async fn route_place_order_and_track() {
        let router = create_router(AppState::default());
        let (s, body) = call(
            &router,
            "POST",
            "/api/orders",
            Some(json!({
                "pizza_id": 1,
                "size": "large",
                "quantity": 2,
                "address": "123 Main St",
                "customer_name": "Raj",
                "phone": "9876543210"
            })),
        )
        .await;
        assert_eq!(s, StatusCode::CREATED);
        assert_eq!(body["total_price"], 720.0);
        assert_eq!(body["status"], "confirmed");

        let order_id = body["order_id"].as_str().unwrap().to_string();
        let (s, order) = call(&router, "GET", &format!("/api/orders/{}", order_id), None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(order["order_id"], order_id.as_str());
        assert_eq!(order["size"], "large");

        let (s, list) = call(&router, "GET", "/api/orders", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn route_place_order_unknown_pizza() {
        let router = create_router(AppState::default());
        let (s, body) = call(
            &router,
            "POST",
            "/api/orders",
            Some(json!({
                "pizza_id": 99,
                "size": "small",
                "address": "1 Road",
                "customer_name": "A",
                "phone": "1"
            })),
        )
        .await;
        assert_eq!(s, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Pizza not found");
    }

    #[tokio::test]
    async fn route_place_order_bad_size() {
        let router = create_router(AppState::default());
        let (s, _) = call(
            &router,
            "POST",
            "/api/orders",
            Some(json!({
                "pizza_id": 1,
                "size": "huge",
                "address": "1 Road",
                "customer_name": "A",
                "phone": "1"
            })),
        )
        .await;
        assert_eq!(s, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn route_track_missing_order() {
        let router = create_router(AppState::default());
        let (s, body) = call(&router, "GET", "/api/orders/ORDNOPE", None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Order not found");
    }

    #[tokio::test]
    async fn route_update_status() {
        let state = AppState::default();
        let resp = state
            .orders
            .place_order(order_request(4, Size::Medium, 1))
            .await
            .unwrap();
        let router = create_router(state);

        let uri = format!("/api/orders/{}/status?status=preparing", resp.order_id);
        let (s, body) = call(&router, "PUT", &uri, None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body["status"], "preparing");
    }

    #[tokio::test]
    async fn route_openapi_document() {
        let router = create_router(AppState::default());
        let (s, body) = call(&router, "GET", "/openapi.json", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body["paths"]["/api/orders"]["post"]["operationId"], "placeOrder");
    }
}
