//! Locale gateway for the bilingual marketing site.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                LOCALE GATEWAY                 │
//!                         │                                               │
//!     Client Request      │  ┌────────┐    ┌──────────────┐              │
//!     ────────────────────┼─▶│  http  │───▶│   redirect   │── match ──▶ 301 Location
//!                         │  │ server │    │    engine    │              │
//!                         │  └───┬────┘    └──────┬───────┘              │
//!                         │      │                │ no match             │
//!                         │      │                ▼                      │
//!                         │      │         ┌──────────────┐              │
//!     Client Response     │      │         │   upstream   │◀────────────┼──── Rendering
//!     ◀───────────────────┼──────┼─────────│   forward    │             │     Origin
//!                         │      │         └──────────────┘              │
//!                         │      │ /api/*                                │
//!                         │      ▼                                       │
//!                         │  ┌──────────────┐    ┌──────────────┐        │
//!                         │  │   content    │───▶│   related    │        │
//!                         │  │    index     │    │    ranker    │        │
//!                         │  └──────────────┘    └──────────────┘        │
//!                         │                                               │
//!                         │  config · observability · lifecycle           │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gateway::config::loader::load_config;
use locale_gateway::config::GatewayConfig;
use locale_gateway::content::ContentIndex;
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::Shutdown;
use locale_gateway::observability;

#[derive(Parser)]
#[command(name = "locale-gateway")]
#[command(about = "Edge gateway: legacy redirects + content API", long_about = None)]
struct Args {
    /// Path to the TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!("locale-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        redirects_enabled = config.redirects.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let content = Arc::new(ContentIndex::load(Path::new(&config.content.index_path))?);
    tracing::info!(
        index_path = %config.content.index_path,
        items = content.len(),
        "Content index loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let handle = shutdown.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, content)?;
    server.run(listener, handle).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
