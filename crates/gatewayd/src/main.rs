//! gatewayd - Gateway registry server daemon
//!
//! Serves the gateway/peripheral REST API over an in-memory store.
//!
//! Usage:
//!   gatewayd [OPTIONS] [config.toml]
//!
//! Without a config file the server listens on 0.0.0.0:8080 with an empty
//! store and a limit of 10 peripherals per gateway.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gateway_api::{create_router, AppState};
use gateway_core::{SeedData, Storage};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat, LoggingConfig};

const DEFAULT_LOG_FILTER: &str = "gatewayd=info,gateway_api=info,gateway_core=info";

#[derive(Parser)]
#[command(name = "gatewayd")]
#[command(author, version, about = "Gateway registry server daemon")]
struct Args {
    /// Server config file (TOML)
    config: Option<PathBuf>,

    /// Listen port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file with gateways and peripherals to create at startup
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(logging: &LoggingConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.storage.seed_file = Some(seed);
    }

    init_tracing(
        &config.logging,
        args.log_json || config.logging.format == LogFormat::Json,
    );

    tracing::info!("Starting gatewayd (Gateway Registry Daemon)");
    if let Some(path) = &args.config {
        tracing::info!("Loaded config from: {}", path.display());
    }

    let storage = Storage::in_memory();
    let state = AppState::with_max_peripherals(storage, config.limits.max_peripherals_per_gateway);

    if let Some(path) = &config.storage.seed_file {
        let seed = SeedData::from_file(path)?;
        let report = seed.apply(&state.gateways, &state.peripherals).await;
        if report.skipped > 0 {
            tracing::warn!(
                skipped = report.skipped,
                "Some seed records were rejected, see warnings above"
            );
        }
    }

    let app = create_router(state).layer(TimeoutLayer::new(config.request_timeout()));

    let addr = config.socket_addr()?;
    tracing::info!(
        max_peripherals = config.limits.max_peripherals_per_gateway,
        "Listening on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
