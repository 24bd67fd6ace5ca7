//! Status emoji entity and emoji display metadata

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::DomainError;
use crate::traits::{DisplayPreference, EmojiLookup};

/// Where an emoji comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    /// Standard unicode emoji, `emoji_code` is the codepoint sequence
    #[default]
    UnicodeEmoji,
    /// Custom emoji uploaded to the organization
    RealmEmoji,
    /// Server-provided extra emoji
    ZulipExtraEmoji,
}

impl ReactionType {
    /// Wire name of this reaction type
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnicodeEmoji => "unicode_emoji",
            Self::RealmEmoji => "realm_emoji",
            Self::ZulipExtraEmoji => "zulip_extra_emoji",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unicode_emoji" => Ok(Self::UnicodeEmoji),
            "realm_emoji" => Ok(Self::RealmEmoji),
            "zulip_extra_emoji" => Ok(Self::ZulipExtraEmoji),
            _ => Err(DomainError::InvalidReactionType(s.to_string())),
        }
    }
}

/// The viewer's emoji display setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Emojiset {
    #[default]
    Google,
    GoogleBlob,
    Twitter,
    /// Emoji are rendered as `:name:` text instead of images
    Text,
}

impl Emojiset {
    /// Whether emoji should be shown by their alt code
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for Emojiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::GoogleBlob => write!(f, "google-blob"),
            Self::Twitter => write!(f, "twitter"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for Emojiset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "google-blob" => Ok(Self::GoogleBlob),
            "twitter" => Ok(Self::Twitter),
            "text" => Ok(Self::Text),
            _ => Err(DomainError::ValidationError(format!("Invalid emojiset: {s}"))),
        }
    }
}

impl DisplayPreference for Emojiset {
    fn emoji_alt_code(&self) -> bool {
        self.is_text()
    }
}

/// Mutable viewer settings, shared with whatever UI code changes them
#[derive(Debug, Default)]
pub struct UserSettings {
    emojiset: RwLock<Emojiset>,
}

impl UserSettings {
    pub fn new(emojiset: Emojiset) -> Self {
        Self {
            emojiset: RwLock::new(emojiset),
        }
    }

    pub fn emojiset(&self) -> Emojiset {
        *self.emojiset.read()
    }

    pub fn set_emojiset(&self, emojiset: Emojiset) {
        *self.emojiset.write() = emojiset;
    }
}

impl DisplayPreference for UserSettings {
    fn emoji_alt_code(&self) -> bool {
        self.emojiset().is_text()
    }
}

/// A user's status emoji as held by the status store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEmoji {
    pub emoji_name: String,
    pub emoji_code: Option<String>,
    pub reaction_type: Option<ReactionType>,
    /// Render as `:emoji_name:` text, fixed when the status was recorded
    pub emoji_alt_code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub still_url: Option<String>,
}

impl StatusEmoji {
    /// Overlay lookup metadata on top of this record.
    ///
    /// Every field present in `details` replaces the field of the same name.
    #[must_use]
    pub fn overlay(mut self, details: EmojiDetails) -> Self {
        if let Some(emoji_name) = details.emoji_name {
            self.emoji_name = emoji_name;
        }
        if let Some(emoji_code) = details.emoji_code {
            self.emoji_code = Some(emoji_code);
        }
        if let Some(reaction_type) = details.reaction_type {
            self.reaction_type = Some(reaction_type);
        }
        if let Some(emoji_alt_code) = details.emoji_alt_code {
            self.emoji_alt_code = emoji_alt_code;
        }
        if let Some(url) = details.url {
            self.url = Some(url);
        }
        if let Some(still_url) = details.still_url {
            self.still_url = Some(still_url);
        }
        self
    }
}

/// Display metadata returned by an emoji lookup.
///
/// Absent fields leave the status record untouched when overlaid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<ReactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_alt_code: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub still_url: Option<String>,
}

impl EmojiDetails {
    /// Metadata for a unicode emoji
    pub fn unicode(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            emoji_name: Some(name.into()),
            emoji_code: Some(code.into()),
            reaction_type: Some(ReactionType::UnicodeEmoji),
            ..Self::default()
        }
    }

    /// Metadata for an organization's custom emoji
    pub fn realm(
        name: impl Into<String>,
        id: impl Into<String>,
        url: impl Into<String>,
        still_url: Option<String>,
    ) -> Self {
        Self {
            emoji_name: Some(name.into()),
            emoji_code: Some(id.into()),
            reaction_type: Some(ReactionType::RealmEmoji),
            url: Some(url.into()),
            still_url,
            ..Self::default()
        }
    }
}

/// In-memory emoji catalog keyed by emoji name
#[derive(Debug, Default)]
pub struct EmojiCatalog {
    by_name: RwLock<HashMap<String, EmojiDetails>>,
}

impl EmojiCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace metadata for an emoji name
    pub fn insert(&self, name: impl Into<String>, details: EmojiDetails) {
        self.by_name.write().insert(name.into(), details);
    }

    pub fn len(&self) -> usize {
        self.by_name.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.read().is_empty()
    }
}

impl FromIterator<(String, EmojiDetails)> for EmojiCatalog {
    fn from_iter<I: IntoIterator<Item = (String, EmojiDetails)>>(iter: I) -> Self {
        Self {
            by_name: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl EmojiLookup for EmojiCatalog {
    fn get_emoji_details_by_name(&self, emoji_name: &str) -> Option<EmojiDetails> {
        self.by_name.read().get(emoji_name).cloned()
    }
}
