//! Ports for the status layer's external collaborators

mod collaborators;

pub use collaborators::{DisplayPreference, EmojiLookup, PostRequest, StatusTransport};
