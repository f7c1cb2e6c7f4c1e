//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use videocloud_core::Config;

/// Render requests carry a short task list; anything larger is rejected before parsing.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Server-level concurrency limit; each request may hold a slot for a full invocation
    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .route("/", get(handlers::health::health))
        .route("/upload-url", get(handlers::upload_url::upload_url))
        .route("/download-url", get(handlers::download_url::download_url))
        .route("/render", post(handlers::render::render))
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
///
/// Explicit origins allow credentials, so methods and headers mirror the
/// preflight request instead of using a wildcard.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_cors_rejects_invalid_origin() {
        let config = Config {
            cors_origins: vec!["http://bad\norigin".to_string()],
            ..Config::default()
        };
        assert!(setup_cors(&config).is_err());
    }

    #[test]
    fn test_setup_cors_accepts_defaults_and_wildcard() {
        assert!(setup_cors(&Config::default()).is_ok());
        let config = Config {
            cors_origins: vec!["*".to_string()],
            ..Config::default()
        };
        assert!(setup_cors(&config).is_ok());
    }
}
