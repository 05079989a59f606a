//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{get_item, health, list_items, metrics, openapi, root, AppState};
use crate::config::Config;
use crate::metrics::track_metrics;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        // Health endpoints
        .route("/health", get(health))
        // Item endpoints
        .route("/api/items", get(list_items))
        .route("/api/items/:id", get(get_item))
        // Operational endpoints
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the API router with the layers the configuration asks for.
///
/// With `cors_enabled`, any origin may call the API, so a browser frontend
/// served from another host can use it.
pub fn router_for_config(config: &Config, state: AppState) -> Router {
    let router = create_router(state);
    if config.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
