//! Integration backend server.
//!
//! # Architecture Overview
//!
//! ```text
//!     loader / browser                 ┌───────────────────────────────────────┐
//!     ─────────────────────────────────┼─▶ http::server (request id, trace,    │
//!                                      │     timeout, body limit)              │
//!                                      │        │                              │
//!                                      │        ▼                              │
//!                                      │   http::handlers ──▶ hubspot::service │
//!                                      │                          │    │       │
//!                                      │               hubspot::store  │       │
//!                                      │               (TTL state,     ▼       │
//!                                      │                credentials) hubspot:: │──▶ HubSpot API
//!                                      │                              api      │
//!                                      └───────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use integration_loader::config::{load_config, LoaderConfig};
use integration_loader::http::IntegrationServer;
use integration_loader::lifecycle::{wait_for_signal, Shutdown};
use integration_loader::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "integration-server")]
#[command(about = "Integration backend serving HubSpot OAuth and item loading", long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("integration-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        hubspot_api = %config.hubspot.api_base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.wait();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    IntegrationServer::new(config)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
