use entity_framework::tracing::setup_tracing;
use movies_api::api;
use movies_api::config::AppConfig;
use movies_api::lifecycle::MovieSystem;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Before the subscriber, so a RUST_LOG from .env applies
    let env_file = dotenvy::dotenv();
    setup_tracing();

    match env_file {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(_) => info!("No .env file found, using process environment"),
    }
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Configuration loaded");

    let system = MovieSystem::start(&config).await?;

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| format!("Failed to bind {address}: {e}"))?;
    info!(%address, "Listening");

    axum::serve(listener, api::app(system.app_state()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    system.shutdown().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
    }
    info!("Shutdown signal received");
}
