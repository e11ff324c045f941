//! CryptPad Exporter Binary
//!
//! Entry point for the CryptPad registered users Prometheus exporter.

#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use exporter::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from a local .env file feed the clap env fallbacks
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    exporter::run_exporter_with_config(config).await
}
