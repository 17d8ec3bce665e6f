//! Wire models for the menu and orders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing Size from string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid pizza size: {0}")]
pub struct ParseSizeError(String);

/// Pizza size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    /// Price multiplier applied on top of the base price
    pub fn multiplier(&self) -> f64 {
        match self {
            Size::Small => 0.8,
            Size::Medium => 1.0,
            Size::Large => 1.2,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ParseSizeError;

    /// Accepts the full names and the one-letter shorthands (`s`, `m`, `l`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "small" => Ok(Size::Small),
            "m" | "medium" => Ok(Size::Medium),
            "l" | "large" => Ok(Size::Large),
            _ => Err(ParseSizeError(s.to_string())),
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pizza menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

fn default_description() -> String {
    "Delicious pizza".to_string()
}

/// Request body for placing an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub pizza_id: u32,
    pub size: Size,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub address: String,
    pub customer_name: String,
    pub phone: String,
}

pub fn default_quantity() -> u32 {
    1
}

/// Response for order creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub status: OrderStatus,
    pub prep_time: String,
    pub total_price: f64,
    pub estimated_delivery_time: String,
}

/// A stored order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub pizza_id: u32,
    pub pizza_name: String,
    pub size: Size,
    pub quantity: u32,
    pub address: String,
    pub customer_name: String,
    pub phone: String,
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parsing_accepts_shorthands() {
        assert_eq!("s".parse::<Size>().unwrap(), Size::Small);
        assert_eq!("Medium".parse::<Size>().unwrap(), Size::Medium);
        assert_eq!(" l ".parse::<Size>().unwrap(), Size::Large);
        assert!("xl".parse::<Size>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
    }

    #[test]
    fn test_order_request_quantity_defaults_to_one() {
        let req: OrderRequest = serde_json::from_value(serde_json::json!({
            "pizza_id": 1,
            "size": "large",
            "address": "123 Main St",
            "customer_name": "Raj",
            "phone": "9876543210"
        }))
        .unwrap();
        assert_eq!(req.quantity, 1);
        assert_eq!(req.size, Size::Large);
    }
}
