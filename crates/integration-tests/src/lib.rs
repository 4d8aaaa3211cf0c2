//! Integration tests for Undangan.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p undangan-integration-tests
//! ```
//!
//! The tests drive the guest services end to end against the in-memory
//! store, which shares its observable semantics with the `PostgreSQL`
//! implementation: sequential identifier minting, the one-time check-in
//! transition, and deletion guarded on prior check-in.
//!
//! # Test Categories
//!
//! - `guest_lifecycle` - registration, check-in, and deletion flows
//! - `concurrency` - racing registrations and scans

use undangan_core::Attendance;
use undangan_server::models::NewGuest;

/// Build a registration submission with the form's defaults for the
/// optional fields.
#[must_use]
pub fn submission(name: &str) -> NewGuest {
    NewGuest {
        name: name.to_owned(),
        message: String::new(),
        attendance: Attendance::Attending,
    }
}

/// Build a registration submission with a message and an explicit
/// attendance choice.
#[must_use]
pub fn submission_with(name: &str, message: &str, attendance: Attendance) -> NewGuest {
    NewGuest {
        name: name.to_owned(),
        message: message.to_owned(),
        attendance,
    }
}
