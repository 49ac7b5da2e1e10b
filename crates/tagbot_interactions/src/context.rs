//! Shared state handed to every handler.

use crate::{OneShotRegistry, Responder, SessionStore};
use derive_getters::Getters;
use std::sync::Arc;
use tagbot_core::Embed;

/// Default embed accent colour.
pub const DEFAULT_EMBED_COLOR: u32 = 0x323338;

/// Handles to the engine's shared services.
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone, Getters)]
pub struct InteractionContext {
    /// Outbound transport
    responder: Arc<dyn Responder>,
    /// Pagination sessions
    sessions: Arc<SessionStore>,
    /// Pending one-shot listeners
    listeners: Arc<OneShotRegistry>,
    /// Accent colour for embeds
    embed_color: u32,
}

impl InteractionContext {
    /// Create a context with the default embed colour.
    pub fn new(
        responder: Arc<dyn Responder>,
        sessions: Arc<SessionStore>,
        listeners: Arc<OneShotRegistry>,
    ) -> Self {
        Self {
            responder,
            sessions,
            listeners,
            embed_color: DEFAULT_EMBED_COLOR,
        }
    }

    /// Override the embed colour.
    pub fn with_embed_color(mut self, color: u32) -> Self {
        self.embed_color = color;
        self
    }

    /// An empty embed in the configured colour.
    pub fn embed(&self) -> Embed {
        Embed::default().with_color(self.embed_color)
    }
}
