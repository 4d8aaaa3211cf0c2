//! `PostgreSQL`-backed guest store.
//!
//! Sequence allocation takes a row lock on the single counter row inside the
//! registration transaction, so concurrent registrations queue up behind one
//! another and each observes a distinct counter value. The check-in
//! transition and the guarded delete are single conditional statements, which
//! makes the row itself the arbiter when two requests race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use undangan_core::{Attendance, GuestDocId, GuestId};

use super::{GuestStore, StoreError};
use crate::models::{GuestRecord, NewGuest};

/// How many times the registration transaction is re-run after a write
/// conflict before the error is surfaced.
const MAX_REGISTER_ATTEMPTS: u32 = 3;

/// Guest store backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgGuestStore {
    pool: PgPool,
}

impl PgGuestStore {
    /// Create a new store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One attempt at the registration transaction: lock and advance the
    /// counter, mint the identifier, insert the record, commit.
    async fn try_create(&self, new_guest: &NewGuest) -> Result<GuestRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Seed the counter row so a fresh deployment reads as zero.
        sqlx::query(
            r"
            INSERT INTO undangan.guest_counter (id, value)
            VALUES (TRUE, 0)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .execute(&mut *tx)
        .await?;

        // The row lock taken by this update serializes concurrent
        // registrations until commit.
        let sequence: i64 = sqlx::query_scalar(
            r"
            UPDATE undangan.guest_counter
            SET value = value + 1
            WHERE id = TRUE
            RETURNING value
            ",
        )
        .fetch_one(&mut *tx)
        .await?;

        let guest_id = GuestId::mint(&new_guest.name, sequence);

        let row = sqlx::query_as::<_, GuestRow>(
            r"
            INSERT INTO undangan.guest (guest_id, name, message, attendance)
            VALUES ($1, $2, $3, $4)
            RETURNING id, guest_id, name, message, attendance, checked_in,
                      registered_at, checked_in_at
            ",
        )
        .bind(&guest_id)
        .bind(&new_guest.name)
        .bind(&new_guest.message)
        .bind(new_guest.attendance)
        .fetch_one(&mut *tx)
        .await?;

        // Conversion runs before commit, so a row the domain model rejects
        // rolls the whole transaction back, counter increment included.
        let record: GuestRecord = row.try_into()?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl GuestStore for PgGuestStore {
    async fn create_guest(&self, new_guest: NewGuest) -> Result<GuestRecord, StoreError> {
        let mut attempt = 1;
        loop {
            match self.try_create(&new_guest).await {
                Err(StoreError::Database(e))
                    if attempt < MAX_REGISTER_ATTEMPTS && is_write_conflict(&e) =>
                {
                    tracing::debug!(
                        attempt,
                        error = %e,
                        "registration transaction conflicted, retrying"
                    );
                    attempt += 1;
                }
                Err(StoreError::Database(e)) if is_unique_violation(&e) => {
                    return Err(StoreError::Conflict("guest identifier already exists".into()));
                }
                other => return other,
            }
        }
    }

    async fn get_by_guest_id(
        &self,
        guest_id: &GuestId,
    ) -> Result<Option<GuestRecord>, StoreError> {
        let row = sqlx::query_as::<_, GuestRow>(
            r"
            SELECT id, guest_id, name, message, attendance, checked_in,
                   registered_at, checked_in_at
            FROM undangan.guest
            WHERE guest_id = $1
            ",
        )
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_by_doc_id(&self, doc_id: GuestDocId) -> Result<Option<GuestRecord>, StoreError> {
        let row = sqlx::query_as::<_, GuestRow>(
            r"
            SELECT id, guest_id, name, message, attendance, checked_in,
                   registered_at, checked_in_at
            FROM undangan.guest
            WHERE id = $1
            ",
        )
        .bind(doc_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn mark_checked_in(
        &self,
        guest_id: &GuestId,
    ) -> Result<Option<GuestRecord>, StoreError> {
        // The `NOT checked_in` predicate makes the transition one-time: of
        // any set of racing calls, exactly one matches the row.
        let row = sqlx::query_as::<_, GuestRow>(
            r"
            UPDATE undangan.guest
            SET checked_in = TRUE, checked_in_at = NOW()
            WHERE guest_id = $1 AND NOT checked_in
            RETURNING id, guest_id, name, message, attendance, checked_in,
                      registered_at, checked_in_at
            ",
        )
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_all(&self) -> Result<Vec<GuestRecord>, StoreError> {
        let rows = sqlx::query_as::<_, GuestRow>(
            r"
            SELECT id, guest_id, name, message, attendance, checked_in,
                   registered_at, checked_in_at
            FROM undangan.guest
            ORDER BY registered_at DESC, guest_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete_checked_in(&self, doc_id: GuestDocId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            DELETE FROM undangan.guest
            WHERE id = $1 AND checked_in
            ",
        )
        .bind(doc_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal row type for guest queries.
#[derive(Debug, sqlx::FromRow)]
struct GuestRow {
    id: Uuid,
    guest_id: String,
    name: String,
    message: String,
    attendance: Attendance,
    checked_in: bool,
    registered_at: DateTime<Utc>,
    checked_in_at: Option<DateTime<Utc>>,
}

impl TryFrom<GuestRow> for GuestRecord {
    type Error = StoreError;

    fn try_from(row: GuestRow) -> Result<Self, Self::Error> {
        let guest_id = GuestId::parse(&row.guest_id).map_err(|e| {
            StoreError::DataCorruption(format!("invalid guest id in database: {e}"))
        })?;

        Ok(Self {
            doc_id: GuestDocId::from_uuid(row.id),
            guest_id,
            name: row.name,
            message: row.message,
            attendance: row.attendance,
            checked_in: row.checked_in,
            registered_at: row.registered_at,
            checked_in_at: row.checked_in_at,
        })
    }
}

/// Serialization failures (40001) and deadlocks (40P01) are safe to retry
/// with a fresh transaction; the counter is re-read on each attempt. A
/// duplicate identifier is retried too, since re-minting from the advanced
/// counter resolves collisions with rows imported out of band.
fn is_write_conflict(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = error {
        matches!(db_err.code().as_deref(), Some("40001" | "40P01")) || db_err.is_unique_violation()
    } else {
        false
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = error {
        db_err.is_unique_violation()
    } else {
        false
    }
}
