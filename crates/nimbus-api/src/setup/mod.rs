//! Application setup and initialization

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;

use nimbus_core::{Config, VideoRegistry};
use nimbus_storage::{CloudinaryClient, MediaGateway};

use crate::state::AppState;

/// Initialize the application: telemetry, provider client, gateway,
/// registry, and the assembled router.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_tracing();

    tracing::info!(
        environment = %config.environment,
        cloud_name = %config.cloudinary.cloud_name,
        folder = %config.folder,
        "Configuration loaded"
    );

    let client = CloudinaryClient::new(&config.cloudinary)
        .map_err(|e| anyhow::anyhow!("Failed to create provider client: {e}"))?;
    let gateway = MediaGateway::new(
        Arc::new(client),
        config.folder.clone(),
        config.list_max_results,
    );
    let videos = VideoRegistry::new();

    let state = Arc::new(AppState::new(gateway, videos, config.clone()));
    let app = routes::setup_routes(&config, state.clone())?;

    Ok((state, app))
}
