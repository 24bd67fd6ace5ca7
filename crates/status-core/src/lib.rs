//! # status-core
//!
//! Domain layer for user status: identifiers, status records, request and
//! snapshot shapes, server events, and the traits for the collaborators the
//! store depends on. This crate has no HTTP or runtime dependencies.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    EmojiCatalog, EmojiDetails, Emojiset, RawUserStatus, ReactionType, ServerUpdateRequest,
    SetStatusEmojiRequest, SetStatusTextRequest, StatusEmoji, UserSettings, UserStatusSnapshot,
};
pub use error::{DomainError, TransportError, TransportResult};
pub use events::{ServerEvent, UserStatusEvent};
pub use traits::{DisplayPreference, EmojiLookup, PostRequest, StatusTransport};
pub use value_objects::{UserId, UserIdParseError};
