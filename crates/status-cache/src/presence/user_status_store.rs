//! In-memory user status store.
//!
//! Holds the local view of every known user's away flag, status text, and
//! status emoji. The three maps are independent of each other.

use parking_lot::RwLock;
use serde_json::Value;
use status_core::{
    DisplayPreference, EmojiLookup, ReactionType, SetStatusEmojiRequest, SetStatusTextRequest,
    StatusEmoji, UserId, UserStatusEvent, UserStatusSnapshot,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Store handle shared between async tasks
pub type SharedStatusStore = Arc<RwLock<UserStatusStore>>;

/// Wrap a store for sharing
pub fn shared(store: UserStatusStore) -> SharedStatusStore {
    Arc::new(RwLock::new(store))
}

/// User status store
pub struct UserStatusStore {
    away_user_ids: HashSet<UserId>,
    /// Values are never empty
    status_text: HashMap<UserId, String>,
    /// `emoji_name` is never empty
    status_emoji: HashMap<UserId, StatusEmoji>,
    emoji_lookup: Arc<dyn EmojiLookup>,
    display: Arc<dyn DisplayPreference>,
}

impl fmt::Debug for UserStatusStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserStatusStore")
            .field("away_user_ids", &self.away_user_ids)
            .field("status_text", &self.status_text)
            .field("status_emoji", &self.status_emoji)
            .finish()
    }
}

impl UserStatusStore {
    /// Create an empty store
    #[must_use]
    pub fn new(emoji_lookup: Arc<dyn EmojiLookup>, display: Arc<dyn DisplayPreference>) -> Self {
        Self {
            away_user_ids: HashSet::new(),
            status_text: HashMap::new(),
            status_emoji: HashMap::new(),
            emoji_lookup,
            display,
        }
    }

    // ========================================================================
    // Away
    // ========================================================================

    pub fn is_away(&self, user_id: UserId) -> bool {
        self.away_user_ids.contains(&user_id)
    }

    pub fn set_away(&mut self, user_id: UserId) {
        self.away_user_ids.insert(user_id);
        tracing::trace!(user_id = %user_id, "Marked user away");
    }

    pub fn revoke_away(&mut self, user_id: UserId) {
        self.away_user_ids.remove(&user_id);
        tracing::trace!(user_id = %user_id, "Revoked user away");
    }

    /// Mark away from an untyped identifier.
    ///
    /// A non-integer is logged as an error; the mutation still goes ahead
    /// when the value can be read as an id (e.g. `"5"`).
    pub fn set_away_raw(&mut self, user_id: &Value) {
        if let Some(user_id) = Self::checked_user_id(user_id) {
            self.set_away(user_id);
        }
    }

    /// Revoke away from an untyped identifier. Same checks as [`Self::set_away_raw`].
    pub fn revoke_away_raw(&mut self, user_id: &Value) {
        if let Some(user_id) = Self::checked_user_id(user_id) {
            self.revoke_away(user_id);
        }
    }

    /// All users currently marked away, in no particular order
    pub fn away_user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.away_user_ids.iter().copied()
    }

    // ========================================================================
    // Status text
    // ========================================================================

    pub fn get_status_text(&self, user_id: UserId) -> Option<&str> {
        self.status_text.get(&user_id).map(String::as_str)
    }

    /// Store the text verbatim, or delete the entry when it is empty
    pub fn set_status_text(&mut self, request: SetStatusTextRequest) {
        match request.status_text {
            Some(text) if !text.is_empty() => {
                self.status_text.insert(request.user_id, text);
            }
            _ => {
                self.status_text.remove(&request.user_id);
            }
        }
    }

    // ========================================================================
    // Status emoji
    // ========================================================================

    pub fn get_status_emoji(&self, user_id: UserId) -> Option<&StatusEmoji> {
        self.status_emoji.get(&user_id)
    }

    /// Record a status emoji, or delete the entry when the name is empty.
    ///
    /// The literal fields go in first, then whatever the emoji lookup
    /// returns for the name is laid over them.
    pub fn set_status_emoji(&mut self, request: SetStatusEmojiRequest) {
        let user_id = request.user_id;
        match self.build_status_emoji(request) {
            Some(emoji) => {
                self.status_emoji.insert(user_id, emoji);
            }
            None => {
                self.status_emoji.remove(&user_id);
            }
        }
    }

    fn build_status_emoji(&self, request: SetStatusEmojiRequest) -> Option<StatusEmoji> {
        let emoji_name = request.emoji_name.filter(|name| !name.is_empty())?;

        let details = self.emoji_lookup.get_emoji_details_by_name(&emoji_name);
        if details.is_none() {
            tracing::warn!(
                user_id = %request.user_id,
                emoji_name = %emoji_name,
                "No emoji metadata for status emoji"
            );
        }

        let literal = StatusEmoji {
            emoji_name,
            emoji_code: request.emoji_code,
            reaction_type: request.reaction_type,
            emoji_alt_code: self.display.emoji_alt_code(),
            url: None,
            still_url: None,
        };

        let emoji = match details {
            Some(details) => literal.overlay(details),
            None => literal,
        };

        // An overlay must not leave a nameless record behind
        (!emoji.emoji_name.is_empty()).then_some(emoji)
    }

    // ========================================================================
    // Bulk load and events
    // ========================================================================

    /// Load the registration snapshot.
    ///
    /// Away flags and status text are replaced wholesale. Status emoji
    /// entries are added or overwritten but never cleared here.
    pub fn initialize(&mut self, snapshot: &UserStatusSnapshot) {
        self.away_user_ids.clear();
        self.status_text.clear();

        for (raw_user_id, entry) in &snapshot.user_status {
            let user_id = match UserId::parse(raw_user_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::error!(key = %raw_user_id, error = %e, "Skipping user status entry");
                    continue;
                }
            };

            if entry.away == Some(true) {
                self.away_user_ids.insert(user_id);
            }

            if let Some(text) = entry.status_text.as_ref().filter(|t| !t.is_empty()) {
                self.status_text.insert(user_id, text.clone());
            }

            if entry.emoji_name.as_deref().is_some_and(|name| !name.is_empty()) {
                self.set_status_emoji(SetStatusEmojiRequest {
                    user_id,
                    emoji_name: entry.emoji_name.clone(),
                    emoji_code: entry.emoji_code.clone(),
                    reaction_type: Self::parse_reaction_type(
                        user_id,
                        entry.reaction_type.as_deref(),
                    ),
                });
            }
        }

        tracing::debug!(
            users = snapshot.user_status.len(),
            away = self.away_user_ids.len(),
            status_text = self.status_text.len(),
            status_emoji = self.status_emoji.len(),
            "Initialized user status store"
        );
    }

    /// Apply a `user_status` event. Absent fields are left unchanged.
    pub fn apply_event(&mut self, event: &UserStatusEvent) {
        let Some(user_id) = Self::checked_user_id(&event.user_id) else {
            return;
        };

        match event.away {
            Some(true) => self.set_away(user_id),
            Some(false) => self.revoke_away(user_id),
            None => {}
        }

        if let Some(text) = &event.status_text {
            self.set_status_text(SetStatusTextRequest {
                user_id,
                status_text: Some(text.clone()),
            });
        }

        if event.emoji_name.is_some() {
            self.set_status_emoji(SetStatusEmojiRequest {
                user_id,
                emoji_name: event.emoji_name.clone(),
                emoji_code: event.emoji_code.clone(),
                reaction_type: Self::parse_reaction_type(user_id, event.reaction_type.as_deref()),
            });
        }
    }

    // ========================================================================
    // Counters
    // ========================================================================

    pub fn away_count(&self) -> usize {
        self.away_user_ids.len()
    }

    pub fn status_text_count(&self) -> usize {
        self.status_text.len()
    }

    pub fn status_emoji_count(&self) -> usize {
        self.status_emoji.len()
    }

    /// Unrecognised reaction types are logged and dropped; the emoji lookup
    /// may still fill the field in
    fn parse_reaction_type(user_id: UserId, raw: Option<&str>) -> Option<ReactionType> {
        match raw?.parse::<ReactionType>() {
            Ok(reaction_type) => Some(reaction_type),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Ignoring reaction type");
                None
            }
        }
    }

    /// Log a non-integer id, then fall back to a lenient read of it
    fn checked_user_id(raw: &Value) -> Option<UserId> {
        match UserId::from_json(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(user_id = %raw, "{e}");
                let coerced = UserId::coerce_json(raw);
                if coerced.is_none() {
                    tracing::warn!(user_id = %raw, "Dropping status change for unusable user id");
                }
                coerced
            }
        }
    }
}
