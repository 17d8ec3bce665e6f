//! Pizza API Library
//!
//! Mock Mission-Pizza backend: a fixed menu plus an in-memory order book
//! exposed over REST.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use pizza_api::server::{create_router, AppState};
//!
//! let app = create_router(AppState::default());
//! ```
//!
//! - Orders live only as long as the process
//! - `GET /openapi.json` serves the document the agent turns into tools

pub mod handlers;
pub mod params;
pub mod repository;
pub mod server;
#[cfg(test)]
mod tests;

pub use repository::{total_price, OrderBook, StoreError};
pub use server::{create_router, serve, serve_listener, AppState, ServerConfig};

/// OpenAPI document describing every route of this service
pub const OPENAPI_SPEC: &str = include_str!("../openapi/pizza_openapi_spec.json");
