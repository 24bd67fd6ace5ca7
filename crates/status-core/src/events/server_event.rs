//! Server events - pushed by the chat server after registration
//!
//! Only the events that touch user status are modelled; anything else is
//! captured as `Other` so a mixed event queue still deserializes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::ReactionType;

/// Events received from the server's event queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    UserStatus(UserStatusEvent),
    #[serde(other)]
    Other,
}

/// A change to one user's status.
///
/// Absent fields were not changed. `user_id` stays untyped because it is
/// validated when the event is applied, not when it is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatusEvent {
    pub user_id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_code: Option<String>,
    /// Wire name, parsed when the event is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
}

impl UserStatusEvent {
    /// Event for the given id with no changes
    pub fn for_user(user_id: impl Into<Value>) -> Self {
        Self {
            user_id: user_id.into(),
            away: None,
            status_text: None,
            emoji_name: None,
            emoji_code: None,
            reaction_type: None,
        }
    }

    #[must_use]
    pub fn with_away(mut self, away: bool) -> Self {
        self.away = Some(away);
        self
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
        self.reaction_type = Some(reaction_type.as_str().to_string());
        self
    }
}
