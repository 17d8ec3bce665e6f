//! HTTP server setup for the Mission-Pizza backend

use anyhow::{Context, Result};
use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::repository::OrderBook;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Menu and in-memory orders
    pub orders: OrderBook,
}

impl AppState {
    pub fn new(orders: OrderBook) -> Self {
        Self { orders }
    }
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Menu
        .route("/pizzas", get(handlers::list_pizzas))
        // Orders
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::place_order),
        )
        .route("/orders/:order_id", get(handlers::track_order))
        .route("/orders/:order_id/status", put(handlers::update_order_status));

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/openapi.json", get(handlers::openapi_document))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve on an already-bound listener
///
/// Lets callers bind port 0 and read the assigned address first.
pub async fn serve_listener(listener: TcpListener, state: AppState) -> Result<()> {
    let app = create_router(state);
    axum::serve(listener, app)
        .await
        .context("Pizza API server failed")?;
    Ok(())
}

/// Start the web server
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Mission-Pizza API listening on http://{}", addr);

    serve_listener(listener, state).await
}
