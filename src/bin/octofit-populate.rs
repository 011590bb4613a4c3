//! Replace the configured database's contents with demo data.

use anyhow::Context;
use chrono::Utc;
use octofit::storage::{config::load_config, Database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let path = config.database.resolved_path();
    let db = Database::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

    let summary = octofit::seed::populate(&db, Utc::now()).context("Population failed")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
