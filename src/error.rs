//! Unified error types for the items service.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::api::handlers::MessageResponse;

/// Unified error type for the items service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Item store construction error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Prometheus exporter installation error.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// Socket bind or serve error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by API handlers.
///
/// Each variant maps to a fixed status code and a `{"message": ...}` body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No item matched the requested id.
    #[error("Item not found")]
    ItemNotFound,

    /// `/metrics` was requested but no exporter is installed.
    #[error("Metrics exporter disabled")]
    MetricsDisabled,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ItemNotFound | ApiError::MetricsDisabled => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = MessageResponse {
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Item store invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Item ids must be positive.
    #[error("item id must be positive")]
    ZeroId,

    /// Two items share an id.
    #[error("duplicate item id {id}")]
    DuplicateId {
        /// The repeated id.
        id: u64,
    },

    /// Item name is empty.
    #[error("item {id} has an empty name")]
    EmptyName {
        /// Id of the offending item.
        id: u64,
    },
}

/// Items client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configured base URL is not usable.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Route path could not be joined onto the base URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Transport or decoding failure.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
