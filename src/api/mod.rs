//! HTTP API module: item routes plus health, metrics and OpenAPI endpoints.

pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, router_for_config};
