//! Interaction responses over serenity's HTTP client.

use crate::render::{autocomplete_response, create_modal, response_message};
use async_trait::async_trait;
use serenity::all::{CreateInteractionResponse, Http, InteractionId};
use std::sync::Arc;
use tagbot_core::{AutocompleteChoice, InteractionToken, ModalForm, Reply};
use tagbot_error::{TagbotResult, TransportError, TransportErrorKind};
use tagbot_interactions::Responder;
use tracing::{debug, instrument};

/// [`Responder`] backed by a serenity [`Http`] client.
///
/// The client is independent of the gateway connection so the dispatcher can
/// be assembled before the bot connects.
#[derive(Clone)]
pub struct SerenityResponder {
    http: Arc<Http>,
}

impl SerenityResponder {
    /// Create a responder with its own HTTP client.
    #[instrument(skip(token), fields(token_len = token.as_ref().len()))]
    pub fn new(token: impl AsRef<str>) -> Self {
        Self::with_http_client(Arc::new(Http::new(token.as_ref())))
    }

    /// Create a responder sharing an existing HTTP client.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self { http }
    }

    async fn send(
        &self,
        token: &InteractionToken,
        response: CreateInteractionResponse,
    ) -> TagbotResult<()> {
        self.http
            .create_interaction_response(
                InteractionId::new(token.id),
                &token.token,
                &response,
                Vec::new(),
            )
            .await
            .map_err(|e| {
                TransportError::new(TransportErrorKind::ResponseFailed(format!(
                    "interaction {}: {}",
                    token.id, e
                )))
            })?;
        Ok(())
    }
}

#[async_trait]
impl Responder for SerenityResponder {
    #[instrument(skip(self, reply), fields(interaction_id = token.id, ephemeral = reply.ephemeral))]
    async fn reply(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        debug!("Sending reply");
        self.send(token, CreateInteractionResponse::Message(response_message(reply)))
            .await
    }

    #[instrument(skip(self, reply), fields(interaction_id = token.id))]
    async fn update_message(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        debug!("Updating message");
        self.send(
            token,
            CreateInteractionResponse::UpdateMessage(response_message(reply)),
        )
        .await
    }

    #[instrument(skip(self, modal), fields(interaction_id = token.id, modal = %modal.custom_id))]
    async fn open_modal(&self, token: &InteractionToken, modal: ModalForm) -> TagbotResult<()> {
        debug!("Opening modal");
        self.send(token, CreateInteractionResponse::Modal(create_modal(modal)))
            .await
    }

    #[instrument(skip(self, choices), fields(interaction_id = token.id, count = choices.len()))]
    async fn autocomplete(
        &self,
        token: &InteractionToken,
        choices: Vec<AutocompleteChoice>,
    ) -> TagbotResult<()> {
        self.send(
            token,
            CreateInteractionResponse::Autocomplete(autocomplete_response(choices)),
        )
        .await
    }
}
