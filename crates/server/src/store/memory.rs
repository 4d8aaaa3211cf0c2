//! In-memory guest store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use undangan_core::{GuestDocId, GuestId};

use super::{GuestStore, StoreError};
use crate::models::{GuestRecord, NewGuest};

/// Mutex-guarded in-memory implementation of [`GuestStore`].
///
/// A single lock around all state makes every operation one indivisible
/// unit, which gives the same observable guarantees as the `PostgreSQL`
/// transactions: gap-free sequence allocation and an exactly-one-winner
/// check-in transition. Used by the service and integration tests.
#[derive(Debug, Default)]
pub struct MemoryGuestStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    counter: i64,
    guests: Vec<GuestRecord>,
}

impl MemoryGuestStore {
    /// Create an empty store with the counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::DataCorruption("guest store mutex poisoned".into()))
    }
}

#[async_trait]
impl GuestStore for MemoryGuestStore {
    async fn create_guest(&self, new_guest: NewGuest) -> Result<GuestRecord, StoreError> {
        let mut state = self.lock()?;

        let sequence = state.counter + 1;
        let guest_id = GuestId::mint(&new_guest.name, sequence);

        let record = GuestRecord {
            doc_id: GuestDocId::generate(),
            guest_id,
            name: new_guest.name,
            message: new_guest.message,
            attendance: new_guest.attendance,
            checked_in: false,
            registered_at: Utc::now(),
            checked_in_at: None,
        };

        // Counter and record commit together under the lock.
        state.counter = sequence;
        state.guests.push(record.clone());

        Ok(record)
    }

    async fn get_by_guest_id(
        &self,
        guest_id: &GuestId,
    ) -> Result<Option<GuestRecord>, StoreError> {
        let state = self.lock()?;
        Ok(state.guests.iter().find(|g| g.guest_id == *guest_id).cloned())
    }

    async fn get_by_doc_id(&self, doc_id: GuestDocId) -> Result<Option<GuestRecord>, StoreError> {
        let state = self.lock()?;
        Ok(state.guests.iter().find(|g| g.doc_id == doc_id).cloned())
    }

    async fn mark_checked_in(
        &self,
        guest_id: &GuestId,
    ) -> Result<Option<GuestRecord>, StoreError> {
        let mut state = self.lock()?;

        let Some(guest) = state
            .guests
            .iter_mut()
            .find(|g| g.guest_id == *guest_id && !g.checked_in)
        else {
            return Ok(None);
        };

        guest.checked_in = true;
        guest.checked_in_at = Some(Utc::now());

        Ok(Some(guest.clone()))
    }

    async fn list_all(&self) -> Result<Vec<GuestRecord>, StoreError> {
        let state = self.lock()?;

        let mut guests = state.guests.clone();
        guests.sort_by(|a, b| {
            b.registered_at
                .cmp(&a.registered_at)
                .then_with(|| a.guest_id.as_str().cmp(b.guest_id.as_str()))
        });

        Ok(guests)
    }

    async fn delete_checked_in(&self, doc_id: GuestDocId) -> Result<bool, StoreError> {
        let mut state = self.lock()?;

        let Some(position) = state
            .guests
            .iter()
            .position(|g| g.doc_id == doc_id && g.checked_in)
        else {
            return Ok(false);
        };

        state.guests.remove(position);
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use undangan_core::Attendance;

    use super::*;

    fn new_guest(name: &str) -> NewGuest {
        NewGuest {
            name: name.to_string(),
            message: String::new(),
            attendance: Attendance::Attending,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_identifiers() {
        let store = MemoryGuestStore::new();

        let first = store.create_guest(new_guest("Budi Santoso")).await.unwrap();
        let second = store.create_guest(new_guest("Siti")).await.unwrap();

        assert_eq!(first.guest_id.as_str(), "Budi_Santoso-001");
        assert_eq!(second.guest_id.as_str(), "Siti-002");
        assert!(!first.checked_in);
        assert!(first.checked_in_at.is_none());
    }

    #[tokio::test]
    async fn check_in_transitions_exactly_once() {
        let store = MemoryGuestStore::new();
        let guest = store.create_guest(new_guest("Budi")).await.unwrap();

        let updated = store.mark_checked_in(&guest.guest_id).await.unwrap();
        let updated = updated.expect("first check-in wins");
        assert!(updated.checked_in);
        assert!(updated.checked_in_at.is_some());

        let repeat = store.mark_checked_in(&guest.guest_id).await.unwrap();
        assert!(repeat.is_none());
    }

    #[tokio::test]
    async fn check_in_of_unknown_identifier_is_none() {
        let store = MemoryGuestStore::new();
        let unknown = GuestId::mint("Nobody", 999);

        let result = store.mark_checked_in(&unknown).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_requires_prior_check_in() {
        let store = MemoryGuestStore::new();
        let guest = store.create_guest(new_guest("Budi")).await.unwrap();

        assert!(!store.delete_checked_in(guest.doc_id).await.unwrap());

        store.mark_checked_in(&guest.guest_id).await.unwrap();
        assert!(store.delete_checked_in(guest.doc_id).await.unwrap());

        let gone = store.get_by_doc_id(guest.doc_id).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn deleted_guests_free_no_sequence_numbers() {
        let store = MemoryGuestStore::new();

        let first = store.create_guest(new_guest("Budi")).await.unwrap();
        store.mark_checked_in(&first.guest_id).await.unwrap();
        store.delete_checked_in(first.doc_id).await.unwrap();

        let second = store.create_guest(new_guest("Siti")).await.unwrap();
        assert_eq!(second.guest_id.sequence(), Some(2));
    }

    #[tokio::test]
    async fn list_is_sorted_newest_first() {
        let store = MemoryGuestStore::new();

        store.create_guest(new_guest("Budi")).await.unwrap();
        store.create_guest(new_guest("Siti")).await.unwrap();
        store.create_guest(new_guest("Andi")).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(
            listed
                .iter()
                .zip(listed.iter().skip(1))
                .all(|(earlier, later)| earlier.registered_at >= later.registered_at)
        );
    }

    #[tokio::test]
    async fn lookup_by_guest_id_round_trips() {
        let store = MemoryGuestStore::new();
        let created = store.create_guest(new_guest("Budi")).await.unwrap();

        let found = store.get_by_guest_id(&created.guest_id).await.unwrap();
        assert_eq!(found.unwrap().doc_id, created.doc_id);
    }
}
