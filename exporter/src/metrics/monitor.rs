//! Periodic refresh of the registered users gauge.
//!
//! Scans the pins directory on a fixed interval and publishes the result
//! through the exporter metrics.

use anyhow::Context;
use pins::ScanSummary;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ScanFailurePolicy};
use crate::state::AppState;

/// Background monitor for the pins directory.
pub struct PinsMonitor {
    state: AppState,
    pins_dir: PathBuf,
    interval_duration: Duration,
    policy: ScanFailurePolicy,
}

impl PinsMonitor {
    /// Creates a new pins monitor.
    ///
    /// # Arguments
    ///
    /// * `state` - Application state holding the metrics to update
    /// * `pins_dir` - Directory holding one folder per user
    /// * `interval_duration` - How often to scan
    /// * `policy` - What to publish when a scan fails
    #[must_use]
    pub fn new(
        state: AppState,
        pins_dir: impl Into<PathBuf>,
        interval_duration: Duration,
        policy: ScanFailurePolicy,
    ) -> Self {
        Self {
            state,
            pins_dir: pins_dir.into(),
            interval_duration,
            policy,
        }
    }

    /// Creates a pins monitor from the exporter configuration.
    #[must_use]
    pub fn from_config(state: AppState, config: &Config) -> Self {
        Self::new(
            state,
            config.pins_dir.clone(),
            config.interval(),
            config.on_scan_error,
        )
    }

    /// Scans the pins directory once and publishes the outcome.
    ///
    /// The scan runs on the blocking thread pool. A failed scan is applied to
    /// the metrics according to the failure policy before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or the scan task panics.
    pub async fn update_once(&self) -> anyhow::Result<ScanSummary> {
        let pins_dir = self.pins_dir.clone();
        let outcome = tokio::task::spawn_blocking(move || pins::scan_summary(&pins_dir))
            .await
            .context("Scan task did not complete")
            .and_then(|scan| scan.context("Failed to scan pins directory"));

        match outcome {
            Ok(summary) => {
                self.state.metrics().record_success(&summary);
                Ok(summary)
            }
            Err(e) => {
                self.state.metrics().record_failure(self.policy);
                Err(e)
            }
        }
    }

    /// Starts the monitoring loop.
    ///
    /// The first scan happens immediately. After each scan the loop sleeps for
    /// the full interval, so a slow scan pushes the next one back instead of
    /// shortening the pause.
    ///
    /// # Cancellation
    ///
    /// This function runs until cancelled via the task handle.
    pub async fn run(self: Arc<Self>) {
        tracing::info!(
            pins_dir = %self.pins_dir.display(),
            interval_secs = self.interval_duration.as_secs(),
            policy = %self.policy,
            "Pins monitor started"
        );

        loop {
            match self.update_once().await {
                Ok(summary) => {
                    tracing::info!(
                        registered_users = summary.entries,
                        user_folders = summary.user_folders,
                        scan_ms = summary.elapsed.as_millis(),
                        "Updated registered users count"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %format!("{e:#}"),
                        policy = %self.policy,
                        published = self.state.metrics().registered_users(),
                        "Error counting registered users"
                    );
                }
            }

            tokio::time::sleep(self.interval_duration).await;
        }
    }
}
