//! assetman - asset inventory tracking and assignment system.
//!
//! Tracks physical assets for a small organization: who added them, who
//! they are assigned to, when they are due back, and which ones are lost.

mod cli;
mod client;
mod config;
mod models;
mod repository;
mod schema;
mod server;
mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "assetman=info"
    } else {
        "assetman=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
