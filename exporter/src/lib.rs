//! CryptPad Prometheus Exporter
//!
//! This crate publishes the number of registered CryptPad users as a
//! Prometheus gauge. It periodically scans the CryptPad pins directory and
//! serves the result on an HTTP scrape endpoint.
//!
//! # Architecture
//!
//! The exporter is built on Axum and Tokio, providing:
//! - A scrape endpoint rendering the metrics registry
//! - A background monitor refreshing the gauge on a fixed interval
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use exporter::{run_exporter_with_config, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_exporter_with_config(Config::parse()).await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod metrics;
mod routes;
mod state;

pub use config::{Config, ScanFailurePolicy};
pub use metrics::{ExporterMetrics, PinsMonitor};
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runs the exporter with the provided configuration.
///
/// The listener is bound before the first scan, so a port that is already in
/// use terminates startup without touching the pins directory. The server
/// shuts down gracefully on SIGTERM/SIGINT.
///
/// # Errors
///
/// Returns an error if:
/// - The metrics cannot be registered
/// - The server fails to bind to the configured address
/// - A fatal error occurs while serving
pub async fn run_exporter_with_config(config: Config) -> Result<()> {
    let addr = config.socket_addr();

    tracing::info!(
        host = %config.host,
        port = %config.port,
        pins_dir = %config.pins_dir.display(),
        "CryptPad exporter starting"
    );

    let state = AppState::with_fresh_registry().context("Failed to register metrics")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics endpoint on {addr}"))?;

    tracing::info!(%addr, "Prometheus exporter listening");

    let monitor = PinsMonitor::from_config(state.clone(), &config);
    serve(listener, state, monitor, shutdown_signal()).await?;

    tracing::info!("Exporter shutdown complete");
    Ok(())
}

/// Serves the scrape endpoint on `listener` while `monitor` refreshes the
/// metrics, until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while serving.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    monitor: PinsMonitor,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let monitor_handle = tokio::spawn(Arc::new(monitor).run());

    let result = axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Metrics server failed");

    monitor_handle.abort();
    result
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::metrics_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
