//! Binary crate for the `weather-server` proxy.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Routing and HTTP response mapping
//! - Logging setup

use clap::Parser;

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
