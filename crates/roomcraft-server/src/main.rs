//! Roomcraft API Server

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use roomcraft_provider::FakeProvider;
use roomcraft_server::{http, AppState, Config};

/// Minimal valid GLB header so the AR page loads before real models exist.
const PLACEHOLDER_GLB: &[u8] = b"glTF\x02\x00\x00\x00\x0c\x00\x00\x00";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load config
    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        public_url = %config.public_url,
        static_dir = %config.static_dir.display(),
        "Starting Roomcraft API"
    );

    prepare_static_tree(&config).await?;

    // Create shared state with the fake provider
    let provider = Arc::new(FakeProvider::new());
    let state = AppState::new(config.clone(), provider.clone(), provider);

    // Create HTTP router and serve
    let router = http::create_router(state.clone());
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Render jobs are not cancellable; let in-flight ones reach a terminal
    // state before exiting.
    info!("Draining in-flight render jobs");
    state.scheduler.drain().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Ensure the static subdirectories exist and a placeholder GLB is present.
async fn prepare_static_tree(config: &Config) -> std::io::Result<()> {
    for dir in [
        config.renders_dir(),
        config.uploads_dir(),
        config.models_dir(),
    ] {
        tokio::fs::create_dir_all(&dir).await?;
        info!(dir = %dir.display(), "Static dir ready");
    }

    let model_path = config.models_dir().join("room_default.glb");
    match tokio::fs::try_exists(&model_path).await {
        Ok(true) => {}
        Ok(false) => {
            tokio::fs::write(&model_path, PLACEHOLDER_GLB).await?;
            info!(path = %model_path.display(), "Placeholder GLB written");
        }
        Err(e) => warn!(error = %e, "Could not check for placeholder GLB"),
    }
    Ok(())
}
