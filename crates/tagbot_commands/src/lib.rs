//! The bot's slash commands.
//!
//! - `/ping` - liveness check
//! - `/tag create|edit|show|delete|list` - support tags
//! - `/topics list|add` - configured discussion topics
//!
//! [`register_all`] wires every command into a [`CommandRegistry`] and claims
//! the pagination namespaces their list views use.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ping;
mod tag;
mod topics;

pub use ping::PingCommand;
pub use tag::{
    TAG_CREATE_MODAL, TAG_EDIT_MODAL, TAG_LIST_NAMESPACE, TAGS_PER_PAGE, TagAutocomplete,
    TagCommand, TagListRenderer,
};
pub use topics::{TOPICS_NAMESPACE, TOPICS_PER_PAGE, TopicsCommand, TopicsRenderer};

use std::sync::Arc;
use tagbot_core::{GuildId, InboundEvent, Reply};
use tagbot_error::TagbotResult;
use tagbot_interactions::{CommandRegistry, InteractionContext, PaginationController};
use tagbot_security::{AccessPolicy, PermissionGate, RoleConfigSource};
use tagbot_storage::{GuildSettingsStore, TagStore, TagValidator};

/// Logical role that may manage tags and topics.
pub const SUPPORT_ROLE: &str = "support";

const GUILD_ONLY_MESSAGE: &str = "> This command can only be used in a server.";

/// Backing stores the commands read and write.
#[derive(Clone)]
pub struct CommandStores {
    /// Support tags
    pub tags: Arc<dyn TagStore>,
    /// Guild settings
    pub settings: Arc<dyn GuildSettingsStore>,
    /// Role configuration for subcommand-level checks
    pub roles: Arc<dyn RoleConfigSource>,
}

/// Register every command and pagination namespace.
///
/// # Errors
///
/// Returns an error if a descriptor or the tag validator fails to build.
#[tracing::instrument(skip_all)]
pub fn register_all(
    commands: &mut CommandRegistry,
    pagination: &mut PaginationController,
    stores: CommandStores,
) -> TagbotResult<()> {
    let gate = PermissionGate::new(stores.roles);
    commands
        .register(ping::descriptor()?)
        .register(tag::descriptor(stores.tags, gate.clone(), TagValidator::new()?)?)
        .register(topics::descriptor(stores.settings, gate)?);

    pagination
        .register(TAG_LIST_NAMESPACE, TagListRenderer)
        .register(TOPICS_NAMESPACE, TopicsRenderer);

    tracing::info!(commands = commands.len(), "Registered bot commands");
    Ok(())
}

/// Guild of the event, replying with an ephemeral notice when there is none.
async fn require_guild(ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<Option<GuildId>> {
    if let Some(guild_id) = event.guild_id() {
        return Ok(Some(guild_id));
    }
    ctx.responder()
        .reply(&event.token, Reply::text(GUILD_ONLY_MESSAGE).ephemeral())
        .await?;
    Ok(None)
}

/// Check the support role for a subcommand that changes guild data.
///
/// Returns `false` after replying with the denial when the actor may not
/// proceed.
async fn require_support_role(
    gate: &PermissionGate,
    ctx: &InteractionContext,
    event: &InboundEvent,
) -> TagbotResult<bool> {
    let policy = AccessPolicy::open().require_config_role(SUPPORT_ROLE);
    let decision = gate
        .authorize(&event.actor, event.app_permissions, &policy)
        .await?;
    match decision.denial_message() {
        None => Ok(true),
        Some(message) => {
            tracing::debug!(%decision, "Subcommand denied");
            ctx.responder()
                .reply(&event.token, Reply::text(message).ephemeral())
                .await?;
            Ok(false)
        }
    }
}
