//! Gateway interactions to engine events.

use serenity::all::{
    ActionRowComponent, CommandInteraction, CommandType, ComponentInteractionDataKind,
    GuildId as DiscordGuildId, Interaction, Permissions, ResolvedOption, ResolvedValue,
    RoleId as DiscordRoleId, User,
};
use tagbot_core::{
    Actor, AutocompleteEvent, CommandEvent, CommandOption, ComponentEvent, EventPayload,
    FocusedOption, GuildId, InboundEvent, InteractionToken, ModalEvent, OptionValue,
    PermissionSet, RoleId, UserId,
};
use tracing::debug;

/// Convert a gateway interaction into an engine event.
///
/// Returns `None` for interactions the engine does not route: pings, select
/// menus, and autocomplete requests without a focused option.
pub fn inbound_event(interaction: &Interaction) -> Option<InboundEvent> {
    match interaction {
        Interaction::Command(command) => {
            let payload = match command.data.kind {
                CommandType::ChatInput => EventPayload::ChatCommand(command_event(command)),
                _ => EventPayload::ContextMenuCommand(command_event(command)),
            };
            let actor = actor(
                &command.user,
                command.guild_id,
                command.member.iter().flat_map(|member| member.roles.iter().copied()),
            );
            Some(envelope(actor, command.id.get(), &command.token, command.app_permissions, payload))
        }
        Interaction::Autocomplete(command) => {
            let Some(focused) = command.data.autocomplete() else {
                debug!(command = %command.data.name, "Autocomplete without a focused option");
                return None;
            };
            let payload = EventPayload::Autocomplete(AutocompleteEvent {
                command: command_event(command),
                focused: FocusedOption {
                    name: focused.name.to_string(),
                    value: focused.value.to_string(),
                },
            });
            let actor = actor(
                &command.user,
                command.guild_id,
                command.member.iter().flat_map(|member| member.roles.iter().copied()),
            );
            Some(envelope(actor, command.id.get(), &command.token, command.app_permissions, payload))
        }
        Interaction::Component(component) => {
            if !matches!(component.data.kind, ComponentInteractionDataKind::Button) {
                debug!(custom_id = %component.data.custom_id, "Ignoring non-button component");
                return None;
            }
            let payload = EventPayload::Button(ComponentEvent {
                custom_id: component.data.custom_id.clone(),
                message_id: component.message.id.get(),
            });
            let actor = actor(
                &component.user,
                component.guild_id,
                component.member.iter().flat_map(|member| member.roles.iter().copied()),
            );
            Some(envelope(
                actor,
                component.id.get(),
                &component.token,
                component.app_permissions,
                payload,
            ))
        }
        Interaction::Modal(modal) => {
            let fields = modal
                .data
                .components
                .iter()
                .flat_map(|row| row.components.iter())
                .filter_map(|component| match component {
                    ActionRowComponent::InputText(input) => Some((
                        input.custom_id.clone(),
                        input.value.clone().unwrap_or_default(),
                    )),
                    _ => None,
                })
                .collect();
            let payload = EventPayload::ModalSubmit(ModalEvent {
                custom_id: modal.data.custom_id.clone(),
                fields,
            });
            let actor = actor(
                &modal.user,
                modal.guild_id,
                modal.member.iter().flat_map(|member| member.roles.iter().copied()),
            );
            Some(envelope(actor, modal.id.get(), &modal.token, modal.app_permissions, payload))
        }
        _ => None,
    }
}

fn actor(
    user: &User,
    guild_id: Option<DiscordGuildId>,
    roles: impl IntoIterator<Item = DiscordRoleId>,
) -> Actor {
    Actor::new(UserId::new(user.id.get()), guild_id.map(|id| GuildId::new(id.get())))
        .with_roles(roles.into_iter().map(|role| RoleId::new(role.get())))
}

fn envelope(
    actor: Actor,
    interaction_id: u64,
    token: &str,
    app_permissions: Option<Permissions>,
    payload: EventPayload,
) -> InboundEvent {
    let granted = PermissionSet::from_bits(app_permissions.map_or(0, |permissions| permissions.bits()));
    InboundEvent::new(actor, InteractionToken::new(interaction_id, token), payload)
        .with_app_permissions(granted)
}

fn command_event(command: &CommandInteraction) -> CommandEvent {
    let mut event = CommandEvent::new(command.data.name.as_str());
    event.target_id = command.data.target_id.map(|id| id.get());
    collect_options(&mut event, command.data.options());
    event
}

/// Flatten subcommand nesting: the innermost subcommand wins, its options
/// become the event's options.
fn collect_options(event: &mut CommandEvent, options: Vec<ResolvedOption<'_>>) {
    for option in options {
        match option.value {
            ResolvedValue::SubCommand(nested) | ResolvedValue::SubCommandGroup(nested) => {
                event.subcommand = Some(option.name.to_string());
                collect_options(event, nested);
            }
            value => event
                .options
                .push(CommandOption::new(option.name, option_value(value))),
        }
    }
}

fn option_value(value: ResolvedValue<'_>) -> OptionValue {
    match value {
        ResolvedValue::String(value) => OptionValue::String(value.to_string()),
        ResolvedValue::Autocomplete { value, .. } => OptionValue::String(value.to_string()),
        ResolvedValue::Integer(value) => OptionValue::Integer(value),
        ResolvedValue::Number(value) => OptionValue::Number(value),
        ResolvedValue::Boolean(value) => OptionValue::Boolean(value),
        ResolvedValue::User(user, _) => OptionValue::User(UserId::new(user.id.get())),
        ResolvedValue::Role(role) => OptionValue::Role(RoleId::new(role.id.get())),
        ResolvedValue::Channel(channel) => OptionValue::Channel(channel.id.get()),
        _ => OptionValue::Unsupported,
    }
}
