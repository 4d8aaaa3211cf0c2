//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin console account
//! undangan-cli admin create -e admin@example.com -n "Admin Name" -p "a strong password"
//! ```
//!
//! # Environment Variables
//!
//! - `UNDANGAN_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string

use sqlx::PgPool;
use thiserror::Error;

use undangan_server::services::{AdminAuthError, AdminAuthService};

use super::database_url;

/// Errors that can occur during admin account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account creation failed.
    #[error("Could not create admin: {0}")]
    Auth(#[from] AdminAuthError),
}

/// Create a new admin account.
///
/// The password is validated and hashed by the same service the server uses
/// for login, so accounts created here work immediately.
///
/// # Errors
///
/// Returns `AdminError` if the email is invalid, the password is too weak,
/// an account with the email already exists, or the database is unreachable.
pub async fn create(email: &str, name: &str, password: &str) -> Result<i32, AdminError> {
    dotenvy::dotenv().ok();

    let database_url = database_url().ok_or(AdminError::MissingEnvVar(
        "UNDANGAN_DATABASE_URL or DATABASE_URL",
    ))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating admin account: {}", email);
    let admin = AdminAuthService::new(&pool)
        .create_admin(email, name, password)
        .await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        admin.id,
        admin.email
    );

    Ok(admin.id.as_i32())
}
