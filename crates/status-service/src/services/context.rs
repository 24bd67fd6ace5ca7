//! Service context - dependency container for services
//!
//! Holds the status store, the transport to the chat server, and the
//! viewer-side collaborators the store reads from.

use std::sync::Arc;

use status_cache::{shared, SharedStatusStore, UserStatusStore};
use status_common::AppConfig;
use status_core::{DisplayPreference, EmojiCatalog, EmojiLookup, StatusTransport, UserSettings};

use super::error::{ServiceError, ServiceResult};
use crate::transport::HttpStatusTransport;

/// Service context containing all dependencies
///
/// Cloning is cheap; every clone refers to the same store and transport.
#[derive(Clone)]
pub struct ServiceContext {
    store: SharedStatusStore,
    transport: Arc<dyn StatusTransport>,
    emoji_lookup: Arc<dyn EmojiLookup>,
    display: Arc<dyn DisplayPreference>,
}

impl ServiceContext {
    /// Create a new service context; the store is built from the lookup and display preference
    pub fn new(
        transport: Arc<dyn StatusTransport>,
        emoji_lookup: Arc<dyn EmojiLookup>,
        display: Arc<dyn DisplayPreference>,
    ) -> Self {
        let store = shared(UserStatusStore::new(emoji_lookup.clone(), display.clone()));
        Self {
            store,
            transport,
            emoji_lookup,
            display,
        }
    }

    /// Build a context talking HTTP to the configured server, with viewer
    /// settings seeded from `config.display`
    ///
    /// # Errors
    /// Returns `ServiceError::Transport` if the HTTP client cannot be built
    pub fn from_config(config: &AppConfig, emoji_lookup: Arc<dyn EmojiLookup>) -> ServiceResult<Self> {
        let settings = Arc::new(UserSettings::new(config.display.emojiset));
        Self::from_config_with_settings(config, emoji_lookup, settings)
    }

    /// Same as [`Self::from_config`] but with caller-owned viewer settings.
    ///
    /// The caller keeps its handle, so emojiset changes made later apply to
    /// every status emoji recorded afterwards.
    ///
    /// # Errors
    /// Returns `ServiceError::Transport` if the HTTP client cannot be built
    pub fn from_config_with_settings(
        config: &AppConfig,
        emoji_lookup: Arc<dyn EmojiLookup>,
        settings: Arc<UserSettings>,
    ) -> ServiceResult<Self> {
        let transport = HttpStatusTransport::from_config(&config.server)?;
        Ok(Self::new(Arc::new(transport), emoji_lookup, settings))
    }

    /// Get the shared status store
    pub fn store(&self) -> &SharedStatusStore {
        &self.store
    }

    /// Get the transport used for server updates
    pub fn transport(&self) -> &Arc<dyn StatusTransport> {
        &self.transport
    }

    /// Get the emoji metadata lookup
    pub fn emoji_lookup(&self) -> &dyn EmojiLookup {
        self.emoji_lookup.as_ref()
    }

    /// Get the viewer's display preference
    pub fn display(&self) -> &dyn DisplayPreference {
        self.display.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &*self.store.read())
            .field("transport", &"dyn StatusTransport")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    transport: Option<Arc<dyn StatusTransport>>,
    emoji_lookup: Option<Arc<dyn EmojiLookup>>,
    display: Option<Arc<dyn DisplayPreference>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(mut self, transport: Arc<dyn StatusTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn emoji_lookup(mut self, lookup: Arc<dyn EmojiLookup>) -> Self {
        self.emoji_lookup = Some(lookup);
        self
    }

    pub fn display(mut self, display: Arc<dyn DisplayPreference>) -> Self {
        self.display = Some(display);
        self
    }

    /// Build the ServiceContext
    ///
    /// Without an emoji lookup an empty catalog is used; without a display
    /// preference the default emoji set is assumed.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if no transport was given
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let transport = self
            .transport
            .ok_or_else(|| ServiceError::validation("transport is required"))?;
        let emoji_lookup = self
            .emoji_lookup
            .unwrap_or_else(|| Arc::new(EmojiCatalog::new()));
        let display = self
            .display
            .unwrap_or_else(|| Arc::new(UserSettings::default()));

        Ok(ServiceContext::new(transport, emoji_lookup, display))
    }
}
