//! Core types for Undangan.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod attendance;
pub mod email;
pub mod guest_id;
pub mod id;

pub use attendance::Attendance;
pub use email::{Email, EmailError};
pub use guest_id::{GuestId, GuestIdError};
pub use id::{AdminUserId, GuestDocId};
