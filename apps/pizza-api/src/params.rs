//! Query parameter definitions

use serde::Deserialize;

use pizza_common::OrderStatus;

/// `?status=` for the status update route
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub status: OrderStatus,
}
