//! Application setup and initialization
//!
//! Kept out of main.rs so integration tests can build the same router with
//! their own clients.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use videocloud_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production());

    tracing::info!(
        environment = %config.environment,
        region = %config.aws_region,
        bucket = %config.s3_bucket,
        "Configuration loaded and validated successfully"
    );

    let storage =
        videocloud_storage::create_storage(&config).context("Failed to initialize storage")?;
    let invoker = videocloud_functions::create_invoker(&config)
        .await
        .context("Failed to initialize function invoker")?;

    let state = Arc::new(AppState::new(&config, storage, invoker));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
