//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness check (verifies database)
//!
//! # Auth
//! POST /login              - Admin login
//! POST /logout             - Admin logout
//!
//! # RSVP
//! POST /submit-rsvp        - Public RSVP submission
//!
//! # Admin (requires session)
//! GET  /admin/data         - Full guest listing
//! POST /admin/updateScan   - One-time QR check-in
//! POST /admin/deleteGuest  - Delete a checked-in guest record
//! ```

pub mod admin;
pub mod auth;
pub mod rsvp;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/submit-rsvp", post(rsvp::submit))
        .route("/admin/data", get(admin::list_guests))
        .route("/admin/updateScan", post(admin::update_scan))
        .route("/admin/deleteGuest", post(admin::delete_guest))
}
