//! Undangan Core - Shared types library.
//!
//! This crate provides common types used across all Undangan components:
//! - `server` - RSVP, check-in, and admin HTTP backend
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for guest identifiers, storage ids, emails,
//!   and the attendance choice

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
