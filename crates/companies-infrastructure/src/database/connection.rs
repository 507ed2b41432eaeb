//! Database connection pool and schema migrations

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

pub async fn create_pool(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(url)
        .await
}

/// Applies pending migrations from `path` (a directory of `.sql` files).
pub async fn run_migrations(pool: &PgPool, path: &str) -> Result<(), MigrateError> {
    let migrator = Migrator::new(Path::new(path)).await?;
    migrator.run(pool).await?;

    let version = migrator.iter().map(|m| m.version).max();
    info!(version = ?version, path = %path, "Migrations applied");

    Ok(())
}
