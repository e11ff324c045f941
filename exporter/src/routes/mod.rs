//! HTTP route definitions.
//!
//! This module organizes the scrape endpoint of the exporter.

mod metrics;

pub use metrics::metrics_routes;
