//! Domain entities - status records and request shapes

mod emoji;
mod user_status;

pub use emoji::{EmojiCatalog, EmojiDetails, Emojiset, ReactionType, StatusEmoji, UserSettings};
pub use user_status::{
    RawUserStatus, ServerUpdateRequest, SetStatusEmojiRequest, SetStatusTextRequest,
    UserStatusSnapshot,
};
