//! QR check-in service.

use thiserror::Error;
use tracing::instrument;

use undangan_core::GuestId;

use crate::models::GuestRecord;
use crate::store::{GuestStore, StoreError};

/// Errors that can occur during check-in.
#[derive(Debug, Error)]
pub enum CheckInError {
    /// Guest identifier missing or blank.
    #[error("guest identifier is required")]
    MissingId,

    /// No guest holds the given identifier.
    #[error("guest not found")]
    NotFound,

    /// The guest was already checked in by an earlier scan.
    #[error("guest already checked in")]
    AlreadyCheckedIn,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Check-in service.
///
/// Drives the one-time transition a guest record makes when their QR code is
/// scanned at the venue.
pub struct CheckInService<'a> {
    guests: &'a dyn GuestStore,
}

impl<'a> CheckInService<'a> {
    /// Create a new check-in service.
    #[must_use]
    pub const fn new(guests: &'a dyn GuestStore) -> Self {
        Self { guests }
    }

    /// Check a guest in by their public identifier.
    ///
    /// The transition is first-scan-wins: the store performs a conditional
    /// update, and of any set of concurrent scans for the same identifier
    /// exactly one succeeds. Returns the updated record on success.
    ///
    /// # Errors
    ///
    /// Returns `CheckInError::MissingId` if the identifier is blank.
    /// Returns `CheckInError::NotFound` if no guest holds the identifier.
    /// Returns `CheckInError::AlreadyCheckedIn` on a repeated scan; the
    /// record is left untouched and keeps its original check-in time.
    #[instrument(skip(self))]
    pub async fn check_in(&self, id: &str) -> Result<GuestRecord, CheckInError> {
        if id.trim().is_empty() {
            return Err(CheckInError::MissingId);
        }

        // An identifier that does not parse cannot name a stored record.
        let Ok(guest_id) = GuestId::parse(id) else {
            return Err(CheckInError::NotFound);
        };

        if let Some(updated) = self.guests.mark_checked_in(&guest_id).await? {
            tracing::info!(guest_id = %updated.guest_id, "guest checked in");
            return Ok(updated);
        }

        // Nothing transitioned: the identifier is unknown, or the guest was
        // checked in before this call.
        match self.guests.get_by_guest_id(&guest_id).await? {
            Some(_) => {
                tracing::warn!(guest_id = %guest_id, "repeated check-in attempt");
                Err(CheckInError::AlreadyCheckedIn)
            }
            None => Err(CheckInError::NotFound),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use undangan_core::Attendance;

    use super::*;
    use crate::models::NewGuest;
    use crate::store::MemoryGuestStore;

    async fn registered_guest(store: &MemoryGuestStore, name: &str) -> GuestRecord {
        store
            .create_guest(NewGuest {
                name: name.to_string(),
                message: String::new(),
                attendance: Attendance::Attending,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_scan_succeeds_and_stamps_time() {
        let store = MemoryGuestStore::new();
        let guest = registered_guest(&store, "Budi").await;
        let service = CheckInService::new(&store);

        let updated = service.check_in(guest.guest_id.as_str()).await.unwrap();

        assert!(updated.checked_in);
        assert!(updated.checked_in_at.is_some());
    }

    #[tokio::test]
    async fn repeated_scan_is_rejected_and_keeps_original_time() {
        let store = MemoryGuestStore::new();
        let guest = registered_guest(&store, "Budi").await;
        let service = CheckInService::new(&store);

        let first = service.check_in(guest.guest_id.as_str()).await.unwrap();
        let second = service.check_in(guest.guest_id.as_str()).await;

        assert!(matches!(second, Err(CheckInError::AlreadyCheckedIn)));

        let stored = store.get_by_guest_id(&guest.guest_id).await.unwrap().unwrap();
        assert_eq!(stored.checked_in_at, first.checked_in_at);
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let store = MemoryGuestStore::new();
        let service = CheckInService::new(&store);

        let result = service.check_in("Nobody-999").await;
        assert!(matches!(result, Err(CheckInError::NotFound)));
    }

    #[tokio::test]
    async fn blank_identifier_is_rejected() {
        let store = MemoryGuestStore::new();
        let service = CheckInService::new(&store);

        let result = service.check_in("  ").await;
        assert!(matches!(result, Err(CheckInError::MissingId)));
    }

    #[tokio::test]
    async fn unparseable_identifier_is_not_found() {
        let store = MemoryGuestStore::new();
        let service = CheckInService::new(&store);

        let result = service.check_in("Budi Santoso-001").await;
        assert!(matches!(result, Err(CheckInError::NotFound)));
    }
}
