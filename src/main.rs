//! Route-service forwarder.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │                 ROUTE FORWARDER               │
//!     Gateway Request     │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     (X-CF-* headers)  ──┼─▶│  http   │───▶│ routing │───▶│ forward  │──┼──▶ Forwarded URL
//!                         │  │ server  │    │trigger  │    │ handler  │  │
//!                         │  └─────────┘    └─────────┘    └────┬─────┘  │
//!                         │                                     │        │
//!     Client Response     │                          ┌──────────▼─────┐  │
//!     ◀───────────────────┼──────────────────────────│upstream client │◀─┼─── Upstream
//!                         │                          └────────────────┘  │     Response
//!                         └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_forwarder::config::load_config;
use route_forwarder::lifecycle::{signals, Shutdown};
use route_forwarder::observability::{logging, metrics};
use route_forwarder::HttpServer;

#[derive(Parser)]
#[command(name = "route-forwarder")]
#[command(about = "Forwards route-service requests to their X-CF-Forwarded-Url", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("route-forwarder v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        connect_timeout_secs = config.client.connect_timeout_secs,
        response_timeout_secs = config.client.response_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let drain = shutdown.drain();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, drain).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
