//! RSVP registration service.

use thiserror::Error;
use tracing::instrument;

use undangan_core::GuestId;

use crate::models::{GuestRecord, NewGuest};
use crate::store::{GuestStore, StoreError};

/// Errors that can occur during registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Guest name missing or blank.
    #[error("guest name is required")]
    MissingName,

    /// Guest name too long for a mintable identifier.
    #[error("guest name is too long")]
    NameTooLong,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Registration service.
///
/// Validates the submission and hands it to the store, which allocates the
/// sequence number and mints the guest identifier in one transaction.
pub struct RegistrationService<'a> {
    guests: &'a dyn GuestStore,
}

impl<'a> RegistrationService<'a> {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(guests: &'a dyn GuestStore) -> Self {
        Self { guests }
    }

    /// Register a guest and return the persisted record.
    ///
    /// The name is stored as submitted; surrounding whitespace survives into
    /// the minted identifier.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::MissingName` if the name is blank.
    /// Returns `RegistrationError::NameTooLong` if the identifier minted from
    /// the name could outgrow [`GuestId::MAX_LENGTH`].
    /// Returns `RegistrationError::Store` if persistence fails; in that case
    /// neither a record nor a counter increment is left behind.
    #[instrument(skip(self, new_guest))]
    pub async fn register(&self, new_guest: NewGuest) -> Result<GuestRecord, RegistrationError> {
        if new_guest.name.trim().is_empty() {
            return Err(RegistrationError::MissingName);
        }

        // Bounding the name here keeps every stored identifier scannable:
        // check-in re-parses what registration minted.
        if !GuestId::name_fits(&new_guest.name) {
            return Err(RegistrationError::NameTooLong);
        }

        let record = self.guests.create_guest(new_guest).await?;

        tracing::info!(guest_id = %record.guest_id, "guest registered");

        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use undangan_core::Attendance;

    use super::*;
    use crate::store::MemoryGuestStore;

    fn submission(name: &str) -> NewGuest {
        NewGuest {
            name: name.to_string(),
            message: "Selamat!".to_string(),
            attendance: Attendance::Attending,
        }
    }

    #[tokio::test]
    async fn register_mints_identifier_from_name() {
        let store = MemoryGuestStore::new();
        let service = RegistrationService::new(&store);

        let record = service.register(submission("Budi Santoso")).await.unwrap();

        assert_eq!(record.guest_id.as_str(), "Budi_Santoso-001");
        assert_eq!(record.name, "Budi Santoso");
        assert!(!record.checked_in);
    }

    #[tokio::test]
    async fn register_preserves_surrounding_whitespace_in_name() {
        let store = MemoryGuestStore::new();
        let service = RegistrationService::new(&store);

        let record = service.register(submission(" Budi ")).await.unwrap();

        assert_eq!(record.name, " Budi ");
        assert_eq!(record.guest_id.as_str(), "_Budi_-001");
    }

    #[tokio::test]
    async fn register_rejects_blank_name() {
        let store = MemoryGuestStore::new();
        let service = RegistrationService::new(&store);

        let empty = service.register(submission("")).await;
        assert!(matches!(empty, Err(RegistrationError::MissingName)));

        let blank = service.register(submission("   ")).await;
        assert!(matches!(blank, Err(RegistrationError::MissingName)));
    }

    #[tokio::test]
    async fn register_rejects_overlong_name_without_burning_a_sequence() {
        let store = MemoryGuestStore::new();
        let service = RegistrationService::new(&store);

        let rejected = service.register(submission(&"a".repeat(600))).await;
        assert!(matches!(rejected, Err(RegistrationError::NameTooLong)));

        // The rejection happens before the store sees the submission.
        let next = service.register(submission("Budi")).await.unwrap();
        assert_eq!(next.guest_id.sequence(), Some(1));
    }
}
