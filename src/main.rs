//! users-api entry point.
//!
//! Initializes tracing, loads configuration from an optional TOML file,
//! resolves the reported version, sets up the Axum router and starts the
//! HTTP server.

use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_api::config::{AppConfig, DEFAULT_LOG_FILTER};
use users_api::http::start_server;
use users_api::{create_router, AppState};

/// users-api: health probe and user directory over JSON
#[derive(Parser, Debug)]
#[command(name = "users-api", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "users_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Instant::now();
    let args = Args::parse();

    // Load configuration before tracing so the log format is known
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    match &args.config {
        Some(path) => tracing::info!(path = %path, "Loaded configuration"),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    let state = AppState::new(config.clone(), started_at);
    tracing::info!(
        version = %state.version,
        health_prefix = %config.routes.health_prefix,
        users_prefix = %config.routes.users_prefix,
        tls = %config.http.tls.mode,
        "Service configured"
    );

    let app = create_router(state);
    start_server(app, &config.http).await?;

    tracing::info!("Server stopped");
    Ok(())
}
