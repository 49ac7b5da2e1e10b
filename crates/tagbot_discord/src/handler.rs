//! Gateway event handler feeding the dispatcher.

use crate::convert::inbound_event;
use crate::publish::{CommandScope, publish_commands};
use serenity::all::{Context, EventHandler, GatewayIntents, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tagbot_core::CommandDefinition;
use tagbot_interactions::Dispatcher;
use tracing::{debug, error, info, instrument};

/// Routes gateway interactions into a [`Dispatcher`].
///
/// This is the process boundary for dispatch errors: they are logged and the
/// bot keeps serving.
pub struct TagbotHandler {
    dispatcher: Arc<Dispatcher>,
    scope: CommandScope,
    published: AtomicBool,
}

impl TagbotHandler {
    /// Create a handler publishing the dispatcher's commands to `scope` once
    /// the gateway is ready.
    pub fn new(dispatcher: Arc<Dispatcher>, scope: CommandScope) -> Self {
        Self {
            dispatcher,
            scope,
            published: AtomicBool::new(false),
        }
    }

    /// Gateway intents the bot needs. Interactions arrive without message
    /// content access.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    fn definitions(&self) -> Vec<CommandDefinition> {
        self.dispatcher
            .commands()
            .iter()
            .map(|descriptor| descriptor.definition().clone())
            .collect()
    }
}

#[async_trait]
impl EventHandler for TagbotHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to gateway");

        if self.published.swap(true, Ordering::SeqCst) {
            debug!("Commands already published, skipping");
            return;
        }
        if let Err(e) = publish_commands(&ctx.http, self.scope, &self.definitions()).await {
            self.published.store(false, Ordering::SeqCst);
            error!(error = %e, scope = %self.scope, "Failed to publish commands");
        }
    }

    #[instrument(skip_all, fields(interaction_id = %interaction.id()))]
    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        let Some(event) = inbound_event(&interaction) else {
            debug!("Interaction not routed");
            return;
        };

        match self.dispatcher.dispatch(&event).await {
            Ok(outcome) => debug!(%outcome, kind = %event.kind(), "Interaction dispatched"),
            Err(e) => error!(
                error = %e,
                kind = %event.kind(),
                identifier = event.identifier(),
                user_id = %event.user_id(),
                "Interaction dispatch failed"
            ),
        }
    }
}
