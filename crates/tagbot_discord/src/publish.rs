//! Publishing command definitions to the platform.

use crate::render::create_command;
use serenity::all::{Command, GuildId as DiscordGuildId, Http};
use tagbot_core::{CommandDefinition, GuildId};
use tagbot_error::{TagbotResult, TransportError, TransportErrorKind};
use tracing::{info, instrument};

/// Where commands are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum CommandScope {
    /// Every guild the bot is in
    #[default]
    #[display("global")]
    Global,
    /// One guild only, replacing its existing commands
    #[display("guild {}", _0)]
    Guild(GuildId),
}

/// Overwrite the published commands in `scope` with `definitions`.
///
/// Returns how many commands the platform acknowledged.
///
/// # Errors
///
/// Returns a transport error if the platform rejects the commands.
#[instrument(skip(http, definitions), fields(scope = %scope, count = definitions.len()))]
pub async fn publish_commands(
    http: &Http,
    scope: CommandScope,
    definitions: &[CommandDefinition],
) -> TagbotResult<usize> {
    let commands = definitions.iter().map(create_command).collect();

    let published = match scope {
        CommandScope::Global => Command::set_global_commands(http, commands).await,
        CommandScope::Guild(guild_id) => {
            DiscordGuildId::new(guild_id.get())
                .set_commands(http, commands)
                .await
        }
    }
    .map_err(|e| {
        TransportError::new(TransportErrorKind::CommandRegistrationFailed(e.to_string()))
    })?;

    info!(published = published.len(), "Published commands");
    Ok(published.len())
}
