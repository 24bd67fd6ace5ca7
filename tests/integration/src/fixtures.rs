//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde_json::json;
use status_core::{EmojiCatalog, EmojiDetails, UserStatusSnapshot};

/// Catalog with a few unicode emoji and one custom emoji
pub fn emoji_catalog() -> EmojiCatalog {
    let catalog = EmojiCatalog::new();
    catalog.insert("tada", EmojiDetails::unicode("tada", "1f389"));
    catalog.insert("coffee", EmojiDetails::unicode("coffee", "2615"));
    catalog.insert("palm_tree", EmojiDetails::unicode("palm_tree", "1f334"));
    catalog.insert(
        "octopus",
        EmojiDetails::realm("octopus", "1", "/user_avatars/2/emoji/images/1.png", None),
    );
    catalog
}

/// Registration snapshot as the server sends it
pub fn registration_snapshot() -> UserStatusSnapshot {
    serde_json::from_value(json!({
        "user_status": {
            "5": { "away": true, "status_text": "brb" },
            "6": { "emoji_name": "coffee", "emoji_code": "2615", "reaction_type": "unicode_emoji" },
            "7": { "status_text": "on vacation", "emoji_name": "palm_tree", "emoji_code": "1f334", "reaction_type": "unicode_emoji" },
            "8": { "emoji_name": "octopus", "emoji_code": "1", "reaction_type": "realm_emoji" }
        }
    }))
    .unwrap_or_default()
}
