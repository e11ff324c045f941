//! Application state module.
//!
//! Defines the shared state handed to route handlers and to the update loop.

use prometheus::{Registry, TextEncoder};

use crate::metrics::ExporterMetrics;

/// State shared between the scrape endpoint and the pins monitor.
///
/// Cloning is cheap: the registry and the metric handles are reference
/// counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Registry rendered on every scrape.
    registry: Registry,
    /// Handles into the metrics held by `registry`.
    metrics: ExporterMetrics,
}

impl AppState {
    /// Creates a new application state, registering the exporter metrics in
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the exporter metrics cannot be registered.
    pub fn new(registry: Registry) -> Result<Self, prometheus::Error> {
        let metrics = ExporterMetrics::new(&registry)?;
        Ok(Self { registry, metrics })
    }

    /// Creates a new application state backed by a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the exporter metrics cannot be registered.
    pub fn with_fresh_registry() -> Result<Self, prometheus::Error> {
        Self::new(Registry::new())
    }

    /// Returns a reference to the metrics registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a reference to the exporter metrics.
    #[must_use]
    pub fn metrics(&self) -> &ExporterMetrics {
        &self.metrics
    }

    /// Renders every metric in the registry in the Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render_metrics(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
