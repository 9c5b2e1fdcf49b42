//! Snippets demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request ID ─▶ trace ─▶ timeout ─▶ security headers
//!                                                            │
//!                                                            ▼
//!                              ┌────────────────────────────────────────┐
//!                              │ router                                 │
//!                              │   /assets/*  → no_index → ServeDir     │
//!                              │   /, /snippet, /snippets[/create]      │
//!                              │       → htmx adapter                   │
//!                              │       → SnippetBox handlers            │
//!                              │       → MemoryStorage / askama views   │
//!                              └────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hxkit::config::{load_config, AppConfig};
use hxkit::observability::{logging, metrics};
use hxkit::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "hxkit")]
#[command(about = "Snippets demo server for the partial-update protocol helpers", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_tracing(&config.observability)?;

    tracing::info!("hxkit v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        assets_dir = %config.assets.dir,
        expiry_hours = config.snippets.expiry_hours,
        request_timeout_secs = config.timeouts.request_secs,
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

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
