//! User status requests and snapshot shapes
//!
//! One typed struct per store operation, plus the shapes the server sends
//! at registration time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::emoji::ReactionType;
use crate::value_objects::UserId;

/// Set or clear a user's status text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetStatusTextRequest {
    pub user_id: UserId,
    /// `None` or an empty string clears the entry
    #[serde(default)]
    pub status_text: Option<String>,
}

impl SetStatusTextRequest {
    pub fn new(user_id: UserId, status_text: impl Into<String>) -> Self {
        Self {
            user_id,
            status_text: Some(status_text.into()),
        }
    }

    pub fn clear(user_id: UserId) -> Self {
        Self {
            user_id,
            status_text: None,
        }
    }
}

/// Set or clear a user's status emoji
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetStatusEmojiRequest {
    pub user_id: UserId,
    /// `None` or an empty string clears the entry
    #[serde(default)]
    pub emoji_name: Option<String>,
    #[serde(default)]
    pub emoji_code: Option<String>,
    #[serde(default)]
    pub reaction_type: Option<ReactionType>,
}

impl SetStatusEmojiRequest {
    pub fn new(
        user_id: UserId,
        emoji_name: impl Into<String>,
        emoji_code: impl Into<String>,
        reaction_type: ReactionType,
    ) -> Self {
        Self {
            user_id,
            emoji_name: Some(emoji_name.into()),
            emoji_code: Some(emoji_code.into()),
            reaction_type: Some(reaction_type),
        }
    }

    pub fn clear(user_id: UserId) -> Self {
        Self {
            user_id,
            emoji_name: None,
            emoji_code: None,
            reaction_type: None,
        }
    }
}

/// Per-user entry of the registration snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUserStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_code: Option<String>,
    /// Wire name, parsed when the entry is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
}

/// Registration snapshot: decimal-string user ids to status entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatusSnapshot {
    #[serde(default)]
    pub user_status: BTreeMap<String, RawUserStatus>,
}

impl UserStatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry keyed by the given user id
    #[must_use]
    pub fn with_user(mut self, user_id: UserId, status: RawUserStatus) -> Self {
        self.user_status.insert(user_id.to_string(), status);
        self
    }
}

/// Body of `POST /json/users/me/status`.
///
/// Absent fields are omitted on the wire and mean "do not change".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<ReactionType>,
}

impl ServerUpdateRequest {
    /// Only the away flag
    pub fn away(away: bool) -> Self {
        Self {
            away: Some(away),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    #[must_use]
    pub fn with_emoji(
        mut self,
        emoji_name: impl Into<String>,
        emoji_code: impl Into<String>,
        reaction_type: ReactionType,
    ) -> Self {
        self.emoji_name = Some(emoji_name.into());
        self.emoji_code = Some(emoji_code.into());
        self.reaction_type = Some(reaction_type);
        self
    }
}
