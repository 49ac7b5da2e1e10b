//! Bot client setup and lifecycle.

use crate::handler::TagbotHandler;
use crate::publish::CommandScope;
use serenity::Client;
use std::sync::Arc;
use tagbot_error::{TagbotResult, TransportError, TransportErrorKind};
use tagbot_interactions::Dispatcher;
use tracing::{info, instrument};

/// A gateway connection wired to a [`Dispatcher`].
pub struct TagbotBot {
    client: Client,
}

impl TagbotBot {
    /// Build the serenity client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the client fails to build.
    #[instrument(skip(token, dispatcher), fields(token_len = token.len(), scope = %scope))]
    pub async fn new(
        token: &str,
        dispatcher: Arc<Dispatcher>,
        scope: CommandScope,
    ) -> TagbotResult<Self> {
        if token.trim().is_empty() {
            return Err(TransportError::new(TransportErrorKind::InvalidToken).into());
        }
        info!(commands = dispatcher.commands().len(), "Initializing Discord client");

        let handler = TagbotHandler::new(dispatcher, scope);
        let client = Client::builder(token, TagbotHandler::intents())
            .event_handler(handler)
            .await
            .map_err(|e| {
                TransportError::new(TransportErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Connect and serve until the gateway closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> TagbotResult<()> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            TransportError::new(TransportErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;
        Ok(())
    }

    /// A handle that can stop the bot from another task.
    pub fn shard_manager(&self) -> Arc<serenity::gateway::ShardManager> {
        self.client.shard_manager.clone()
    }
}
