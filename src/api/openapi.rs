//! OpenAPI description of the item routes.

use utoipa::OpenApi;

use super::handlers::{self, HealthResponse, MessageResponse};
use crate::store::Item;

/// OpenAPI document covering the root, health and item routes.
#[derive(OpenApi)]
#[openapi(
    info(title = "items-api", description = "Read-only REST API over a fixed item list"),
    paths(handlers::root, handlers::health, handlers::list_items, handlers::get_item),
    components(schemas(Item, MessageResponse, HealthResponse)),
    tags(
        (name = "status", description = "Liveness routes"),
        (name = "items", description = "Item lookup routes")
    )
)]
pub struct ApiDoc;
