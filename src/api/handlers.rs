//! HTTP API handlers.

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{OpenApi, ToSchema};

use crate::error::ApiError;
use crate::store::{Item, ItemStore};

use super::openapi::ApiDoc;

/// Message returned by the root route.
pub const ROOT_MESSAGE: &str = "Backend API is running!";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only item store.
    pub store: Arc<ItemStore>,
    /// Prometheus handle, present when the exporter is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state over the given store, without metrics.
    pub fn new(store: ItemStore) -> Self {
        Self {
            store: Arc::new(store),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("items", &self.store.len())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// `{"message": ...}` body, used by the root route and all errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    #[schema(example = "Item not found")]
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    #[schema(example = "ok")]
    pub status: String,
}

/// Root handler - confirms the API is up.
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses((status = 200, description = "API is running", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// List every item in store order.
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    responses((status = 200, description = "All items", body = [Item]))
)]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.all().to_vec())
}

/// Fetch one item by id. Ids that are not integers are simply not found.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Numeric item id")),
    responses(
        (status = 200, description = "Matching item", body = Item),
        (status = 404, description = "No item has this id", body = MessageResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    match state.store.find(&id) {
        Some(item) => Ok(Json(item.clone())),
        None => {
            debug!(id = %id, "item not found");
            Err(ApiError::ItemNotFound)
        }
    }
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::MetricsDisabled)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

/// OpenAPI document for the item routes.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
