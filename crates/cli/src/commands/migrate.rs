//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! undangan-cli migrate run
//!
//! # Show which migrations are applied and which are pending
//! undangan-cli migrate info
//! ```
//!
//! # Environment Variables
//!
//! - `UNDANGAN_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string
//!
//! Migration files live in `crates/server/migrations/` and are embedded in
//! the binary at compile time.

use std::collections::HashSet;

use sqlx::PgPool;
use sqlx::migrate::Migrate;
use thiserror::Error;

use super::database_url;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url().ok_or(MigrationError::MissingEnvVar(
        "UNDANGAN_DATABASE_URL or DATABASE_URL",
    ))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Report the status of every known migration.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or the migration
/// bookkeeping table cannot be read.
pub async fn info() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url().ok_or(MigrationError::MissingEnvVar(
        "UNDANGAN_DATABASE_URL or DATABASE_URL",
    ))?;

    let pool = PgPool::connect(&database_url).await?;
    let mut conn = pool.acquire().await?;

    // A fresh database has no bookkeeping table yet; create it so every
    // migration simply reads as pending.
    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    let migrator = sqlx::migrate!("../server/migrations");
    for migration in migrator.iter() {
        let status = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        tracing::info!(
            version = migration.version,
            status,
            "{}",
            migration.description
        );
    }

    Ok(())
}
