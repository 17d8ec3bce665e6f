//! In-memory menu and order storage
//!
//! The order book is owned state handed to the router, so every test can
//! build an isolated instance.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use pizza_common::{Order, OrderRequest, OrderResponse, OrderStatus, Pizza, Size};

/// Preparation time quoted on every confirmation
pub const PREP_TIME: &str = "25 minutes";

/// Minutes from order creation to estimated delivery (prep + travel)
pub const DELIVERY_MINUTES: i64 = 35;

/// Allowed quantity per order
pub const QUANTITY_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Errors raised by order book operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Pizza not found")]
    PizzaNotFound(u32),

    #[error("Order not found")]
    OrderNotFound(String),

    #[error("quantity must be between 1 and 10, got {0}")]
    InvalidQuantity(u32),
}

/// The fixed menu served by the backend
pub fn default_menu() -> Vec<Pizza> {
    let pizza = |id: u32, name: &str, description: &str, price: f64, ingredients: &[&str]| Pizza {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        pizza(
            1,
            "Margherita",
            "Classic tomato, mozzarella, and fresh basil",
            300.0,
            &["tomato sauce", "mozzarella", "basil"],
        ),
        pizza(
            2,
            "Pepperoni",
            "Tomato sauce, mozzarella, and pepperoni slices",
            400.0,
            &["tomato sauce", "mozzarella", "pepperoni"],
        ),
        pizza(
            3,
            "Vegetarian",
            "Mixed vegetables with mozzarella and olive oil",
            350.0,
            &["tomato sauce", "mozzarella", "bell peppers", "mushrooms", "onions"],
        ),
        pizza(
            4,
            "Chicken Tikka",
            "Indian style pizza with tandoori chicken",
            450.0,
            &["chicken tikka", "mozzarella", "onions", "cilantro"],
        ),
        pizza(
            5,
            "Paneer Masala",
            "Spiced cottage cheese with Indian spices",
            380.0,
            &["paneer", "mozzarella", "tomato sauce", "spices"],
        ),
    ]
}

/// Total price for an order line, rounded to two decimals
pub fn total_price(base_price: f64, size: Size, quantity: u32) -> f64 {
    let total = base_price * f64::from(quantity) * size.multiplier();
    (total * 100.0).round() / 100.0
}

/// Generate an order id of the form `ORD1A2B3C4D`
pub fn new_order_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("ORD{}", uuid[..8].to_uppercase())
}

/// Menu plus orders kept in creation order
#[derive(Clone)]
pub struct OrderBook {
    menu: Arc<Vec<Pizza>>,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new(default_menu())
    }
}

impl OrderBook {
    /// Create an order book serving the given menu
    pub fn new(menu: Vec<Pizza>) -> Self {
        Self {
            menu: Arc::new(menu),
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn menu(&self) -> &[Pizza] {
        &self.menu
    }

    /// Validate and store a new order
    pub async fn place_order(&self, request: OrderRequest) -> Result<OrderResponse, StoreError> {
        if !QUANTITY_RANGE.contains(&request.quantity) {
            return Err(StoreError::InvalidQuantity(request.quantity));
        }

        let pizza = self
            .menu
            .iter()
            .find(|p| p.id == request.pizza_id)
            .ok_or(StoreError::PizzaNotFound(request.pizza_id))?;

        let total = total_price(pizza.price, request.size, request.quantity);
        let created_at = Utc::now();
        let estimated_delivery_time = created_at + Duration::minutes(DELIVERY_MINUTES);

        let order = Order {
            order_id: new_order_id(),
            pizza_id: pizza.id,
            pizza_name: pizza.name.clone(),
            size: request.size,
            quantity: request.quantity,
            address: request.address,
            customer_name: request.customer_name,
            phone: request.phone,
            status: OrderStatus::Confirmed,
            total_price: total,
            created_at,
            estimated_delivery_time,
        };

        let response = OrderResponse {
            order_id: order.order_id.clone(),
            status: order.status,
            prep_time: PREP_TIME.to_string(),
            total_price: total,
            estimated_delivery_time: estimated_delivery_time.to_rfc3339(),
        };

        tracing::info!(
            order_id = %order.order_id,
            pizza = %order.pizza_name,
            total = total,
            "Order placed"
        );

        self.orders.write().await.push(order);

        Ok(response)
    }

    /// All orders in creation order
    pub async fn list_orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Order, StoreError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned()
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))
    }

    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;

        order.status = status;
        tracing::info!(order_id = %order_id, status = %status, "Order status updated");

        Ok(order.clone())
    }
}
