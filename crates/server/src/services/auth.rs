//! Admin authentication service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use undangan_core::{Email, EmailError};

use crate::db::RepositoryError;
use crate::db::admin_users::AdminUserRepository;
use crate::models::AdminUser;

/// Minimum password length for newly created admin accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Email or password missing from the request.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or no such admin).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An admin with this email already exists.
    #[error("admin already exists")]
    AlreadyExists,

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Admin authentication service.
///
/// Verifies login credentials against stored Argon2id hashes and creates
/// admin accounts for the bootstrap CLI.
pub struct AdminAuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::MissingCredentials` if either field is empty.
    /// Returns `AdminAuthError::InvalidCredentials` if the email/password is
    /// wrong; an unknown email and a wrong password are indistinguishable to
    /// the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AdminAuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AdminAuthError::MissingCredentials);
        }

        // A malformed email cannot belong to any account.
        let email = Email::parse(email).map_err(|_| AdminAuthError::InvalidCredentials)?;

        let (admin, password_hash) = self
            .admins
            .get_with_password_hash(&email)
            .await?
            .ok_or(AdminAuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        tracing::info!(admin_id = %admin.id, "admin logged in");

        Ok(admin)
    }

    /// Create a new admin account.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AdminAuthError::WeakPassword` if the password is too short.
    /// Returns `AdminAuthError::AlreadyExists` if the email is taken.
    #[instrument(skip(self, password))]
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminUser, AdminAuthError> {
        let email = Email::parse(email)?;

        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let admin = self
            .admins
            .create(&email, name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AdminAuthError::AlreadyExists,
                other => AdminAuthError::Repository(other),
            })?;

        Ok(admin)
    }
}

fn validate_password(password: &str) -> Result<(), AdminAuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AdminAuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}
