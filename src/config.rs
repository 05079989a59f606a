//! Application configuration loaded from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumString};
use url::Url;

use crate::error::AppError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Interface the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin.
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Install the Prometheus exporter and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    // === Client Configuration ===
    /// Base URL the client commands talk to.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    // === Logging ===
    /// Log filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log format: pretty or json.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            metrics_enabled: true,
            api_url: default_api_url(),
            rust_log: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Validate, reporting failures as [`AppError::InvalidConfig`].
    pub fn ensure_valid(&self) -> crate::Result<()> {
        self.validate().map_err(AppError::InvalidConfig)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        self.bind_addr()?;
        self.api_base_url()?;
        self.log_format()?;
        Ok(())
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("HOST/PORT do not form a socket address: {}", e))
    }

    /// Parsed client base URL. Only absolute http(s) URLs are accepted.
    pub fn api_base_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.api_url).map_err(|e| format!("API_URL is invalid: {}", e))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("API_URL must use http or https, got {}", other)),
        }
    }

    /// Parsed log format.
    pub fn log_format(&self) -> Result<LogFormat, String> {
        LogFormat::from_str(&self.log_format)
            .map_err(|_| format!("LOG_FORMAT must be pretty or json, got {}", self.log_format))
    }
}
