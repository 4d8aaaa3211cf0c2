//! Admin console guest operations.

use thiserror::Error;
use tracing::instrument;

use undangan_core::GuestDocId;

use crate::models::GuestRecord;
use crate::store::{GuestStore, StoreError};

/// Errors that can occur during admin guest operations.
#[derive(Debug, Error)]
pub enum GuestAdminError {
    /// Record id missing or blank.
    #[error("guest id is required")]
    MissingId,

    /// No guest record with the given id.
    #[error("guest not found")]
    NotFound,

    /// Deletion refused because the guest has not been checked in.
    #[error("only checked-in guests can be deleted")]
    NotCheckedIn,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Admin console service: full guest listing and guarded deletion.
pub struct GuestAdminService<'a> {
    guests: &'a dyn GuestStore,
}

impl<'a> GuestAdminService<'a> {
    /// Create a new admin guest service.
    #[must_use]
    pub const fn new(guests: &'a dyn GuestStore) -> Self {
        Self { guests }
    }

    /// Every guest record, newest registration first.
    ///
    /// Read fresh from the store on each call so the console always shows
    /// current check-in flags.
    ///
    /// # Errors
    ///
    /// Returns `GuestAdminError::Store` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<GuestRecord>, GuestAdminError> {
        let guests = self.guests.list_all().await?;
        Ok(guests)
    }

    /// Delete a guest record by its storage id.
    ///
    /// Only records already checked in may be deleted; the precondition and
    /// the delete are one atomic store operation, so a concurrent check-in
    /// cannot slip between them.
    ///
    /// # Errors
    ///
    /// Returns `GuestAdminError::MissingId` if the id is blank.
    /// Returns `GuestAdminError::NotFound` if no record has the id.
    /// Returns `GuestAdminError::NotCheckedIn` if the record exists but was
    /// never scanned.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), GuestAdminError> {
        if id.trim().is_empty() {
            return Err(GuestAdminError::MissingId);
        }

        // An id that is not a valid uuid cannot name a stored record.
        let Ok(doc_id) = id.parse::<GuestDocId>() else {
            return Err(GuestAdminError::NotFound);
        };

        if self.guests.delete_checked_in(doc_id).await? {
            tracing::info!(%doc_id, "guest record deleted");
            return Ok(());
        }

        // Nothing was deleted: the record is missing, or it exists but has
        // not been checked in.
        match self.guests.get_by_doc_id(doc_id).await? {
            Some(_) => Err(GuestAdminError::NotCheckedIn),
            None => Err(GuestAdminError::NotFound),
        }
    }
}
