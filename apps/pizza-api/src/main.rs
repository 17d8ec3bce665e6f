//! Pizza API - Mock Mission-Pizza REST backend
//!
//! Menu and orders are kept in memory and lost on restart.

use clap::Parser;

use pizza_api::{serve, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "pizza-api")]
#[command(about = "Mock pizza-ordering REST backend")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "PIZZA_API_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PIZZA_API_PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pizza_common::init_tracing("pizza_api")?;

    let cli = Cli::parse();

    tracing::info!("Starting Mission-Pizza API");

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };
    serve(config, AppState::default()).await?;

    tracing::info!("Mission-Pizza API stopped");

    Ok(())
}
