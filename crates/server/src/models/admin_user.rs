//! Admin user domain types.

use chrono::{DateTime, Utc};

use undangan_core::{AdminUserId, Email};

/// An admin user (domain type).
///
/// The password hash stays inside the repository layer and is never part of
/// this type, so it cannot leak through serialization or logging.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
    /// When the admin was last updated.
    pub updated_at: DateTime<Utc>,
}
