//! OctoFit - fitness tracking backend
//!
//! Main entry point for the HTTP server.

use octofit::storage::config::load_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OctoFit v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    octofit::server::serve(config).await
}
