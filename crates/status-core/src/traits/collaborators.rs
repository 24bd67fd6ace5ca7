//! Collaborator traits (ports) - what the status layer needs from outside
//!
//! The store and service define what they consume; the HTTP client, the
//! emoji metadata source and the viewer's settings provide it.

use async_trait::async_trait;

use crate::entities::{EmojiDetails, ServerUpdateRequest};
use crate::error::TransportResult;

// ============================================================================
// Outbound requests
// ============================================================================

/// A POST the status layer wants delivered to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// Path relative to the server base URL, e.g. `/json/users/me/status`
    pub path: &'static str,
    pub data: ServerUpdateRequest,
    /// Repeating the request cannot change the outcome
    pub idempotent: bool,
}

#[async_trait]
pub trait StatusTransport: Send + Sync {
    /// Deliver one request. Retry policy, if any, belongs to the implementor.
    async fn post(&self, request: PostRequest) -> TransportResult<()>;
}

// ============================================================================
// Emoji metadata
// ============================================================================

pub trait EmojiLookup: Send + Sync {
    /// Display metadata for an emoji name, `None` if the name is unknown
    fn get_emoji_details_by_name(&self, emoji_name: &str) -> Option<EmojiDetails>;
}

// ============================================================================
// Viewer settings
// ============================================================================

pub trait DisplayPreference: Send + Sync {
    /// Whether the viewer sees emoji as `:name:` text rather than images
    fn emoji_alt_code(&self) -> bool;
}
