use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{AppState, config::ServerConfig, routes};
use common::storage::FileSystemStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting video service");

    let config = ServerConfig::from_env()?;

    // Initialize binary storage
    let video_store = FileSystemStore::new(&config.storage_dir).await?;

    let bind_address = config.bind_address();
    let app_state = AppState::new(config, Arc::new(video_store));

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Video service listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
