//! Seeds the career/skill catalog. Pass `--reset` to truncate all tables
//! (including users and plans) before seeding.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass_api::config::Config;
use compass_api::db::create_pool;
use compass_api::seed;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let reset = std::env::args().any(|arg| arg == "--reset");
    let pool = create_pool(&config.database_url).await?;

    let summary = seed::run(&pool, reset).await?;
    info!(
        "Seed complete: {} careers, {} skills, {} requirements, {} resources",
        summary.careers, summary.skills, summary.requirements, summary.resources
    );
    info!("Try a profile like: interests = programming, data; skills = python, sql");

    Ok(())
}
