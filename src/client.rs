//! HTTP client for the items API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::handlers::{HealthResponse, MessageResponse};
use crate::config::Config;
use crate::error::ClientError;
use crate::store::Item;

/// Client for the items API.
#[derive(Debug, Clone)]
pub struct ItemsClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL all routes are resolved against.
    base_url: Url,
}

impl ItemsClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Create a client from the `API_URL` setting.
    ///
    /// Applies the same http(s) check as [`Config::validate`].
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.api_base_url().map_err(ClientError::InvalidBaseUrl)?)
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route path against the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// URL of one item. The id is pushed as a single percent-encoded path
    /// segment, so `?`, `#` and `/` inside it stay part of the id.
    pub fn item_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("/api/items")?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidBaseUrl(format!("{} cannot carry path segments", self.base_url))
            })?
            .push(id);
        Ok(url)
    }

    /// `GET /`.
    #[instrument(skip(self))]
    pub async fn root(&self) -> Result<MessageResponse, ClientError> {
        self.get_json(self.endpoint("/")?).await
    }

    /// `GET /health`.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json(self.endpoint("/health")?).await
    }

    /// `GET /api/items`.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        self.get_json(self.endpoint("/api/items")?).await
    }

    /// `GET /api/items/{id}`. A 404 is reported as `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> Result<Option<Item>, ClientError> {
        match self.get_json(self.item_url(id)?).await {
            Ok(item) => Ok(Some(item)),
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(url = %url, "GET");

        let response = self.http.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ItemsClient {
        ItemsClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_joins_root_base() {
        let c = client("http://localhost:3001");
        assert_eq!(
            c.endpoint("/api/items").unwrap().as_str(),
            "http://localhost:3001/api/items"
        );
        assert_eq!(c.endpoint("/").unwrap().as_str(), "http://localhost:3001/");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let c = client("http://example.com/backend");
        assert_eq!(
            c.endpoint("/api/items/1").unwrap().as_str(),
            "http://example.com/backend/api/items/1"
        );
    }

    #[test]
    fn from_config_uses_api_url() {
        let c = ItemsClient::from_config(&Config::default()).unwrap();
        assert_eq!(c.base_url().as_str(), "http://localhost:3001/");
    }

    #[test]
    fn from_config_rejects_garbage_url() {
        let config = Config {
            api_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            ItemsClient::from_config(&config),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn from_config_rejects_non_http_scheme() {
        let config = Config {
            api_url: "ftp://localhost:3001".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            ItemsClient::from_config(&config),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn item_url_encodes_id_as_one_segment() {
        let c = client("http://localhost:3001");
        assert_eq!(
            c.item_url("1").unwrap().as_str(),
            "http://localhost:3001/api/items/1"
        );
        assert_eq!(
            c.item_url("1?x=1").unwrap().as_str(),
            "http://localhost:3001/api/items/1%3Fx=1"
        );
        assert_eq!(
            c.item_url("1#top").unwrap().as_str(),
            "http://localhost:3001/api/items/1%23top"
        );
        assert_eq!(
            c.item_url("../../health").unwrap().as_str(),
            "http://localhost:3001/api/items/..%2F..%2Fhealth"
        );
    }

    #[test]
    fn item_url_keeps_base_path_prefix() {
        let c = client("http://example.com/backend/");
        assert_eq!(
            c.item_url("2").unwrap().as_str(),
            "http://example.com/backend/api/items/2"
        );
    }
}
