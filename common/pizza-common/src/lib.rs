//! Pizza Common - Shared pieces for the Mission-Pizza services
//!
//! This crate is used by both the mock backend (`pizza-api`) and the tool
//! agent (`pizza_agent`):
//!
//! - **Models**: wire types for the menu and orders (`Pizza`, `Order`, ...)
//! - **Errors**: the JSON error body returned by the backend
//! - **Init**: [`init_tracing`] for consistent logging setup
//!
//! # Example
//!
//! ```rust,ignore
//! use pizza_common::{init_tracing, Size};
//!
//! init_tracing("pizza_api")?;
//! assert_eq!(Size::Large.multiplier(), 1.2);
//! ```

pub mod error;
pub mod init;
pub mod models;

// Re-export commonly used items at crate root
pub use error::ErrorBody;
pub use init::init_tracing;
pub use models::{
    Order, OrderRequest, OrderResponse, OrderStatus, ParseSizeError, Pizza, Size,
};
