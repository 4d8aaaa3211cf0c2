//! Guest record domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use undangan_core::{Attendance, GuestDocId, GuestId};

/// A registered guest (domain type).
///
/// Created by an RSVP submission and mutated only by the one-time check-in
/// transition; deletion requires the guest to already be checked in.
/// Serialization uses the wire names the invitation pages consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Opaque storage id (wire: `id`).
    #[serde(rename = "id")]
    pub doc_id: GuestDocId,
    /// Public identifier printed into the QR code (wire: `id_tamu`).
    #[serde(rename = "id_tamu")]
    pub guest_id: GuestId,
    /// Guest name as submitted (wire: `nama`).
    #[serde(rename = "nama")]
    pub name: String,
    /// Greeting for the couple (wire: `pesan`).
    #[serde(rename = "pesan")]
    pub message: String,
    /// Attendance choice (wire: `kehadiran`).
    #[serde(rename = "kehadiran")]
    pub attendance: Attendance,
    /// Whether the QR code has been scanned at the reception (wire: `scanned`).
    #[serde(rename = "scanned")]
    pub checked_in: bool,
    /// Server-assigned registration time (wire: `timestamp`).
    #[serde(rename = "timestamp")]
    pub registered_at: DateTime<Utc>,
    /// Set exactly once by the check-in transition (wire: `timestamp_scan`).
    #[serde(rename = "timestamp_scan", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Input for creating a guest record.
///
/// Defaults for the optional RSVP fields are applied before this is built,
/// so the store always receives concrete values.
#[derive(Debug, Clone)]
pub struct NewGuest {
    /// Guest name as submitted.
    pub name: String,
    /// Greeting for the couple; empty when the form left it out.
    pub message: String,
    /// Attendance choice.
    pub attendance: Attendance,
}
