//! Metric handles for the registered users gauge and scan health.

use chrono::Utc;
use pins::ScanSummary;
use prometheus::{Gauge, IntCounter, IntGauge, Opts, Registry};

use crate::config::ScanFailurePolicy;

/// Prometheus metrics for the CryptPad exporter.
///
/// All handles are cheap clones sharing the same underlying atomics, so the
/// update loop and the scrape handler always observe the same values.
#[derive(Debug, Clone)]
pub struct ExporterMetrics {
    registered_users: IntGauge,
    user_folders: IntGauge,
    scan_errors_total: IntCounter,
    last_success_timestamp: IntGauge,
    scan_duration_seconds: Gauge,
}

impl ExporterMetrics {
    /// Create new metrics registered with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails, for example when the
    /// registry already holds metrics with the same names.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let registered_users = IntGauge::with_opts(Opts::new(
            "cryptpad_registered_users",
            "Number of registered users",
        ))?;
        registry.register(Box::new(registered_users.clone()))?;

        let user_folders = IntGauge::with_opts(Opts::new(
            "cryptpad_user_folders",
            "Number of user folders found in the pins directory",
        ))?;
        registry.register(Box::new(user_folders.clone()))?;

        let scan_errors_total = IntCounter::with_opts(Opts::new(
            "cryptpad_scan_errors_total",
            "Total number of failed scans of the pins directory",
        ))?;
        registry.register(Box::new(scan_errors_total.clone()))?;

        let last_success_timestamp = IntGauge::with_opts(Opts::new(
            "cryptpad_last_scan_success_timestamp_seconds",
            "Unix time of the last successful scan of the pins directory",
        ))?;
        registry.register(Box::new(last_success_timestamp.clone()))?;

        let scan_duration_seconds = Gauge::with_opts(Opts::new(
            "cryptpad_scan_duration_seconds",
            "Duration of the last successful scan in seconds",
        ))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;

        Ok(Self {
            registered_users,
            user_folders,
            scan_errors_total,
            last_success_timestamp,
            scan_duration_seconds,
        })
    }

    /// Publish the result of a successful scan.
    pub fn record_success(&self, summary: &ScanSummary) {
        self.registered_users.set(saturating_i64(summary.entries));
        self.user_folders.set(saturating_i64(summary.user_folders));
        self.scan_duration_seconds.set(summary.elapsed.as_secs_f64());
        self.last_success_timestamp.set(Utc::now().timestamp());
    }

    /// Account for a failed scan according to `policy`.
    pub fn record_failure(&self, policy: ScanFailurePolicy) {
        self.scan_errors_total.inc();
        match policy {
            ScanFailurePolicy::Keep => {}
            ScanFailurePolicy::Zero => {
                self.registered_users.set(0);
                self.user_folders.set(0);
            }
        }
    }

    /// Currently published number of registered users.
    #[must_use]
    pub fn registered_users(&self) -> i64 {
        self.registered_users.get()
    }

    /// Currently published number of user folders.
    #[must_use]
    pub fn user_folders(&self) -> i64 {
        self.user_folders.get()
    }

    /// Number of failed scans since startup.
    #[must_use]
    pub fn scan_errors(&self) -> u64 {
        self.scan_errors_total.get()
    }

    /// Unix time of the last successful scan, 0 if none succeeded yet.
    #[must_use]
    pub fn last_success_timestamp(&self) -> i64 {
        self.last_success_timestamp.get()
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
