//! Guest record storage.
//!
//! [`GuestStore`] is the storage boundary for guest records: registration's
//! counter-and-insert transaction, the one-time check-in transition, and the
//! guarded delete all live behind it. Services depend on the trait, not on a
//! concrete backend.
//!
//! # Implementations
//!
//! - [`PgGuestStore`]: production implementation backed by `PostgreSQL`
//!   transactions
//! - [`MemoryGuestStore`]: mutex-guarded map with the same observable
//!   semantics, used by the integration tests

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use undangan_core::{GuestDocId, GuestId};

use crate::models::{GuestRecord, NewGuest};

pub use memory::MemoryGuestStore;
pub use postgres::PgGuestStore;

/// Errors that can occur during guest storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// An identifier collided with an existing record.
    #[error("identifier conflict: {0}")]
    Conflict(String),
}

/// Storage abstraction for guest records.
///
/// Implementations must be `Send + Sync`; every method is one indivisible
/// unit as observed by all concurrent callers, which is what the state
/// machine of a guest record relies on.
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Atomically allocate the next sequence number, mint the guest
    /// identifier from it, and persist the new record.
    ///
    /// The counter increment and the insert commit together or not at all.
    /// Concurrent registrations each receive a distinct, gap-free sequence
    /// number; implementations re-read the counter when a write conflict
    /// forces a retry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if persistence fails, leaving neither
    /// a record nor a counter increment behind.
    async fn create_guest(&self, new_guest: NewGuest) -> Result<GuestRecord, StoreError>;

    /// Fetch a record by its public identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the lookup fails.
    async fn get_by_guest_id(&self, guest_id: &GuestId)
    -> Result<Option<GuestRecord>, StoreError>;

    /// Fetch a record by its storage id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the lookup fails.
    async fn get_by_doc_id(&self, doc_id: GuestDocId) -> Result<Option<GuestRecord>, StoreError>;

    /// Attempt the one-time check-in transition.
    ///
    /// Returns the updated record if this call performed the transition.
    /// `None` means no record transitioned: either the identifier is unknown
    /// or the guest is already checked in; callers disambiguate with
    /// [`GuestStore::get_by_guest_id`]. Of any set of concurrent calls for
    /// the same identifier, exactly one receives `Some`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the update fails.
    async fn mark_checked_in(&self, guest_id: &GuestId)
    -> Result<Option<GuestRecord>, StoreError>;

    /// All records, newest registration first.
    ///
    /// Recomputed on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    async fn list_all(&self) -> Result<Vec<GuestRecord>, StoreError>;

    /// Delete a record, but only if it is checked in.
    ///
    /// Returns `true` if a record was deleted; `false` means no record
    /// matched both the id and the checked-in requirement.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the delete fails.
    async fn delete_checked_in(&self, doc_id: GuestDocId) -> Result<bool, StoreError>;
}
