//! Exporter configuration module.
//!
//! Every setting resolves from an explicit command-line flag, then an
//! environment variable, then a built-in default.

use clap::{Parser, ValueEnum};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the CryptPad pins directory.
pub const DEFAULT_PINS_DIR: &str = "/srv/cryptpad/data/pins/";

/// Default port for the metrics endpoint.
pub const DEFAULT_PORT: u16 = 8000;

/// Default number of seconds between two scans.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 30;

/// What to publish when a scan of the pins directory fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScanFailurePolicy {
    /// Keep the last successfully published value.
    Keep,
    /// Publish zero registered users.
    #[default]
    Zero,
}

impl std::fmt::Display for ScanFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Zero => write!(f, "zero"),
        }
    }
}

/// CryptPad Prometheus exporter
///
/// Counts registered users in the CryptPad pins directory and publishes the
/// result as the `cryptpad_registered_users` gauge.
#[derive(Debug, Clone, Parser)]
#[command(name = "cryptpad-exporter")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the user pins directory
    #[arg(long, env = "PINS_DIR", default_value = DEFAULT_PINS_DIR)]
    pub pins_dir: PathBuf,

    /// Address to bind the metrics endpoint to
    #[arg(long, env = "EXPORTER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to expose the Prometheus metrics on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds between two scans of the pins directory
    #[arg(
        long,
        env = "EXPORTER_INTERVAL_SECONDS",
        default_value_t = DEFAULT_INTERVAL_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_seconds: u64,

    /// What to publish when the pins directory cannot be scanned
    #[arg(
        long,
        env = "EXPORTER_ON_SCAN_ERROR",
        value_enum,
        default_value_t = ScanFailurePolicy::Zero
    )]
    pub on_scan_error: ScanFailurePolicy,
}

impl Config {
    /// Returns the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the delay between two scans.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pins_dir: PathBuf::from(DEFAULT_PINS_DIR),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            on_scan_error: ScanFailurePolicy::Zero,
        }
    }
}
