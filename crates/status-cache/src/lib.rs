//! # status-cache
//!
//! In-memory caching layer for user status.
//!
//! ## Features
//!
//! - **Away flags**: which users are currently marked away
//! - **Status text**: free-text status per user
//! - **Status emoji**: emoji records enriched with display metadata
//! - **Snapshot and events**: bulk load at registration, incremental updates after
//!
//! ## Example
//!
//! ```ignore
//! use status_cache::UserStatusStore;
//! use status_core::{EmojiCatalog, Emojiset, UserId};
//!
//! let mut store = UserStatusStore::new(Arc::new(EmojiCatalog::new()), Arc::new(Emojiset::Google));
//! store.initialize(&snapshot);
//!
//! if store.is_away(UserId::new(5)) {
//!     // ...
//! }
//! ```

pub mod presence;

// Re-export presence types
pub use presence::{shared, SharedStatusStore, UserStatusStore};
