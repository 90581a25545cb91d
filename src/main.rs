//! Quotation relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http ──▶ relay ──fetch──▶ upstream ────────┼──▶ Quote provider
//!                           │              │                               │
//!     Client Response       │              │ reply (≤ response deadline)   │
//!     ◀─────────────────────┼──────────────┘                               │
//!                           │              └─spawn──▶ store ───────────────┼──▶ Postgres
//!                           │                  (≤ persist deadline)        │
//!                           └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use quote_relay::config::load_config;
use quote_relay::lifecycle::{signals, Shutdown};
use quote_relay::observability::{logging, metrics};
use quote_relay::store::PostgresStore;
use quote_relay::upstream::UpstreamClient;
use quote_relay::{HttpServer, Relay};

#[derive(Parser)]
#[command(name = "quote-relay")]
#[command(about = "Relays the latest exchange-rate quotation within a strict deadline")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("quote-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        response_deadline_ms = config.deadlines.response_ms,
        persist_deadline_ms = config.deadlines.persist_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let source = Arc::new(UpstreamClient::new(&config.upstream)?);
    let sink = Arc::new(PostgresStore::new(config.store.url.clone()));
    let relay = Relay::new(source, sink, &config.deadlines);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    HttpServer::new(config, relay)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
