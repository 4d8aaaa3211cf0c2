//! Domain models for the server.

pub mod admin_user;
pub mod guest;
pub mod session;

pub use admin_user::AdminUser;
pub use guest::{GuestRecord, NewGuest};
pub use session::{CurrentAdmin, keys as session_keys};
