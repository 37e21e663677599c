//! Migrate command - applies pending database migrations

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{self, PostgresConfig, PostgresMigrator};

/// Apply pending migrations and report the resulting schema version.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init_logging(&config.logging);

    let pool = storage::connect(
        &PostgresConfig::new(&config.database.url)
            .with_max_connections(config.database.max_connections),
    )
    .await?;

    let migrator = PostgresMigrator::new(pool);
    migrator.run().await?;

    info!("Schema version: {:?}", migrator.version().await?);

    Ok(())
}
