//! Mission-Pizza backend access: the HTTP client and the tool handlers
//! bound to its operations

mod client;
mod handlers;

pub use client::{ApiError, PizzaApiClient, DEFAULT_TIMEOUT};
pub use handlers::{create_handlers, OPERATION_IDS};
