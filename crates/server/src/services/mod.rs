//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin login against stored Argon2 password hashes
//! - `check_in` - One-time QR check-in transition
//! - `guest_admin` - Admin console listing and guarded delete
//! - `registration` - RSVP registration with transactional id minting

pub mod auth;
pub mod check_in;
pub mod guest_admin;
pub mod registration;

pub use auth::{AdminAuthError, AdminAuthService};
pub use check_in::{CheckInError, CheckInService};
pub use guest_admin::{GuestAdminError, GuestAdminService};
pub use registration::{RegistrationError, RegistrationService};
