//! Prometheus metrics published by the exporter.
//!
//! This module owns the metric handles registered in the exporter's registry
//! and the background monitor that refreshes them from the pins directory.

pub mod monitor;
pub mod registry;

pub use monitor::PinsMonitor;
pub use registry::ExporterMetrics;
