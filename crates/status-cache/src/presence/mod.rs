//! Presence storage module.
//!
//! Tracks away flags, status text, and status emoji per user.

mod user_status_store;

pub use user_status_store::{shared, SharedStatusStore, UserStatusStore};
