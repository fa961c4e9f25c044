//! shift-engine - HTTP service for schedule generation and shift pricing
//!
//! Loads the engine configuration once and serves the API router.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_engine::api::{create_router, AppState};
use shift_engine::config::ConfigLoader;

/// shift-engine - Shift schedule and compensation service
#[derive(Parser, Debug)]
#[command(name = "shift-engine")]
#[command(about = "Shift schedule synthesis and compensation service", long_about = None)]
struct Args {
    /// Configuration directory (or set SHIFT_ENGINE_CONFIG env var)
    #[arg(short, long, env = "SHIFT_ENGINE_CONFIG", default_value = "./config/default")]
    config: PathBuf,

    /// Address to listen on (or set SHIFT_ENGINE_BIND env var)
    #[arg(short, long, env = "SHIFT_ENGINE_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "shift-engine starting"
    );

    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    info!(
        config_path = %args.config.display(),
        name = %loader.metadata().name,
        version = %loader.metadata().version,
        units = loader.config().units().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    info!(addr = %args.bind, "Listening");
    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
