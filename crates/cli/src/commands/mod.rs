//! CLI command implementations.

pub mod admin;
pub mod migrate;

/// Database connection string from the environment.
///
/// `UNDANGAN_DATABASE_URL` wins over the generic `DATABASE_URL`.
pub fn database_url() -> Option<String> {
    std::env::var("UNDANGAN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
