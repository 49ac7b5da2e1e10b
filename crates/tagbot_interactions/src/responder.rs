//! Outbound seam to the chat transport.

use async_trait::async_trait;
use tagbot_core::{AutocompleteChoice, InteractionToken, ModalForm, Reply};
use tagbot_error::TagbotResult;

/// Sends responses for an interaction.
///
/// Each interaction accepts exactly one initial response; the engine never
/// calls two of these for the same token.
///
/// # Example Implementation
///
/// ```rust,ignore
/// pub struct SerenityResponder {
///     http: Arc<Http>,
/// }
///
/// #[async_trait]
/// impl Responder for SerenityResponder {
///     async fn reply(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
///         let response = CreateInteractionResponse::Message(message_builder(reply));
///         self.http
///             .create_interaction_response(token.id.into(), &token.token, &response, Vec::new())
///             .await
///             .map_err(TransportError::from)?;
///         Ok(())
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait Responder: Send + Sync {
    /// Reply with a new message.
    async fn reply(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()>;

    /// Replace the message the activated component is attached to.
    async fn update_message(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()>;

    /// Open a modal dialog.
    async fn open_modal(&self, token: &InteractionToken, modal: ModalForm) -> TagbotResult<()>;

    /// Answer an autocomplete request.
    async fn autocomplete(
        &self,
        token: &InteractionToken,
        choices: Vec<AutocompleteChoice>,
    ) -> TagbotResult<()>;
}
