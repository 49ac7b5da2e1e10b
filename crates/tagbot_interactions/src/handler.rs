//! Handler contracts.

use crate::InteractionContext;
use async_trait::async_trait;
use tagbot_core::{AutocompleteChoice, FocusedOption, InboundEvent};
use tagbot_error::TagbotResult;

/// Runs a command after it passed authorization.
///
/// The handler owns the interaction's response: it must answer through
/// [`InteractionContext::responder`] exactly once.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle a chat-input or context-menu command event.
    ///
    /// # Errors
    ///
    /// Any error is surfaced from the dispatcher as a handler failure.
    async fn handle(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<()>;
}

/// Produces suggestions for an option the user is typing.
#[async_trait]
pub trait AutocompleteHandler: Send + Sync {
    /// Suggestions for `focused`. The dispatcher truncates to the platform limit.
    async fn suggest(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        focused: &FocusedOption,
    ) -> TagbotResult<Vec<AutocompleteChoice>>;
}
