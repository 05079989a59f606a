//! HTTP server startup.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{router_for_config, AppState};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::store::ItemStore;
use crate::utils::shutdown_signal;

/// Build the application state for a configuration.
///
/// Installs the global Prometheus recorder when metrics are enabled, so call
/// this at most once per process with `metrics_enabled` set.
pub fn build_state(config: &Config) -> Result<AppState> {
    let store = ItemStore::reference()?;
    info!("Loaded {} items", store.len());

    let mut state = AppState::new(store);
    if config.metrics_enabled {
        state = state.with_metrics(metrics::install_recorder()?);
        info!("Prometheus metrics available at /metrics");
    }
    Ok(state)
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Validate the configuration, bind, and serve until Ctrl-C or SIGTERM.
pub async fn run(config: Config) -> Result<()> {
    config.ensure_valid()?;
    let addr = config.bind_addr().map_err(AppError::InvalidConfig)?;

    let state = build_state(&config)?;
    let router = router_for_config(&config, state);

    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, router, shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_rejects_invalid_config_before_binding() {
        let config = Config {
            api_url: "ftp://localhost".to_string(),
            ..Config::default()
        };
        assert!(matches!(run(config).await, Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn build_state_without_metrics_serves_reference_items() {
        let config = Config {
            metrics_enabled: false,
            ..Config::default()
        };
        let state = build_state(&config).unwrap();
        assert_eq!(state.store.len(), 3);
        assert!(state.metrics.is_none());
    }

    #[tokio::test]
    async fn serve_stops_when_shutdown_resolves() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let state = AppState::new(ItemStore::reference().unwrap());
        let router = router_for_config(&Config::default(), state);
        serve_with_shutdown(listener, router, async {}).await.unwrap();
    }
}
