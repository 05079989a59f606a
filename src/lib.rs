//! Read-only REST API over a fixed in-memory item list.
//!
//! The service answers four contract routes:
//!
//! ```text
//! GET /                -> {"message": "Backend API is running!"}
//! GET /health          -> {"status": "ok"}
//! GET /api/items       -> [{"id": 1, "name": ..., "description": ...}, ...]
//! GET /api/items/:id   -> the item, or 404 {"message": "Item not found"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: The fixed item dataset
//! - [`api`]: HTTP routes and handlers
//! - [`client`]: HTTP client for the same routes
//! - [`metrics`]: Prometheus request metrics
//! - [`server`]: Server startup and shutdown
//! - [`utils`]: Utility functions

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::{Item, ItemStore};
