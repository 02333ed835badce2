use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tail_intel::{
    api::{build_router, AppState},
    config::Config,
    store::Store,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Threat Actor Intelligence Lookup service
#[derive(Parser, Debug)]
#[command(name = "tail-intel", version, about)]
struct Args {
    /// Path to the SQLite intelligence database (overrides configuration)
    #[arg(long, env = "TAIL_DATABASE")]
    database: Option<PathBuf>,

    /// Port to listen on (overrides configuration)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tail_intel=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = Config::load().context("failed to load configuration")?;

    if let Some(database) = args.database {
        config.database.path = database;
    }
    if let Some(port) = args.port {
        config.server.http_port = port;
    }

    tracing::info!("Starting TAIL v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.database.path.display());

    // Open the read-only store and verify the database is reachable
    let store = Store::open(&config.database.path);
    match store.ping() {
        Ok(()) => tracing::info!("Intelligence database reachable"),
        Err(e) => {
            tracing::warn!("Intelligence database not reachable at startup: {}", e);
            tracing::warn!("Requests will fail until the database is available");
        }
    }

    // Build HTTP router
    let app_state = AppState::new(store);
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Filter options: http://{}/v1/filters", http_addr);
    tracing::info!("   Search: http://{}/v1/search", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
