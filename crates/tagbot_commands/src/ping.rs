//! `/ping`.

use async_trait::async_trait;
use tagbot_core::{CommandDefinition, InboundEvent, Permission, Reply};
use tagbot_error::TagbotResult;
use tagbot_interactions::{CommandDescriptor, CommandHandler, InteractionContext};

/// Replies `Pong!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn handle(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<()> {
        ctx.responder().reply(&event.token, Reply::text("Pong!")).await
    }
}

pub(crate) fn descriptor() -> TagbotResult<CommandDescriptor> {
    CommandDescriptor::builder()
        .definition(CommandDefinition::chat_input("ping", "Check that the bot is responding"))
        .handler(PingCommand)
        .require_permission(Permission::SendMessages)
        .build()
}
