//! Inbound interaction events.
//!
//! One [`InboundEvent`] is built per gateway interaction. The envelope carries
//! who acted, where, and the permissions the platform granted the bot for the
//! interaction; the [`EventPayload`] carries the variant-specific data.

use crate::{GuildId, PermissionSet, RoleId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The user that triggered an interaction, resolved for the current guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Acting user
    pub user_id: UserId,
    /// Guild the interaction happened in, `None` in direct messages
    pub guild_id: Option<GuildId>,
    /// Roles the user holds in that guild
    pub roles: HashSet<RoleId>,
}

impl Actor {
    /// Create an actor with no roles.
    pub fn new(user_id: UserId, guild_id: Option<GuildId>) -> Self {
        Self {
            user_id,
            guild_id,
            roles: HashSet::new(),
        }
    }

    /// Set the actor's roles.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }
}

/// Handle the transport needs to answer an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionToken {
    /// Interaction snowflake
    pub id: u64,
    /// Continuation token
    pub token: String,
}

impl InteractionToken {
    /// Create a token.
    pub fn new(id: u64, token: impl Into<String>) -> Self {
        Self {
            id,
            token: token.into(),
        }
    }
}

/// A resolved command option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    /// String option
    String(String),
    /// Integer option
    Integer(i64),
    /// Floating point option
    Number(f64),
    /// Boolean option
    Boolean(bool),
    /// User mention option
    User(UserId),
    /// Role mention option
    Role(RoleId),
    /// Channel option
    Channel(u64),
    /// Any option kind the engine does not interpret
    Unsupported,
}

/// A named command option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option name
    pub name: String,
    /// Option value
    pub value: OptionValue,
}

impl CommandOption {
    /// Create an option.
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Payload of a chat-input or context-menu command.
///
/// Subcommand options are flattened: `subcommand` names the invoked
/// subcommand and `options` holds its arguments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandEvent {
    /// Top-level command name
    pub name: String,
    /// Invoked subcommand, if any
    pub subcommand: Option<String>,
    /// Option values
    pub options: Vec<CommandOption>,
    /// Target user or message of a context-menu command
    pub target_id: Option<u64>,
}

impl CommandEvent {
    /// Create a command payload with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the subcommand.
    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    /// Append an option.
    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.push(CommandOption::new(name, value));
        self
    }

    /// Look up an option by name.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    /// Look up a string option by name.
    pub fn string_option(&self, name: &str) -> Option<&str> {
        match self.option(name) {
            Some(OptionValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// The option the user is currently typing in an autocomplete request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusedOption {
    /// Option name
    pub name: String,
    /// Partial input
    pub value: String,
}

/// Payload of an autocomplete request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutocompleteEvent {
    /// The command being typed
    pub command: CommandEvent,
    /// Option being completed
    pub focused: FocusedOption,
}

/// Payload of a message component (button) activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEvent {
    /// Encoded component identifier
    pub custom_id: String,
    /// Message the component is attached to
    pub message_id: u64,
}

/// Payload of a modal submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalEvent {
    /// Encoded modal identifier
    pub custom_id: String,
    /// Text input values keyed by input custom id
    pub fields: HashMap<String, String>,
}

impl ModalEvent {
    /// Value of a text input, `None` when absent.
    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.fields.get(custom_id).map(String::as_str)
    }

    /// Trimmed value of a text input, `None` when absent or blank.
    pub fn non_empty_field(&self, custom_id: &str) -> Option<String> {
        self.field(custom_id)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Variant-specific part of an inbound event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    /// Slash command
    ChatCommand(CommandEvent),
    /// User or message context-menu command
    ContextMenuCommand(CommandEvent),
    /// Autocomplete request for a command option
    Autocomplete(AutocompleteEvent),
    /// Button click
    Button(ComponentEvent),
    /// Modal submission
    ModalSubmit(ModalEvent),
}

/// Discriminant of [`EventPayload`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    /// Slash command
    ChatCommand,
    /// Context-menu command
    ContextMenuCommand,
    /// Autocomplete request
    Autocomplete,
    /// Button click
    Button,
    /// Modal submission
    ModalSubmit,
}

/// A typed inbound interaction.
///
/// # Examples
///
/// ```
/// use tagbot_core::{Actor, EventKind, InboundEvent, InteractionToken, ModalEvent, UserId};
///
/// let event = InboundEvent::modal_submit(
///     Actor::new(UserId::new(42), None),
///     InteractionToken::new(1, "token"),
///     ModalEvent { custom_id: "tag_create_42".into(), ..Default::default() },
/// );
/// assert_eq!(event.kind(), EventKind::ModalSubmit);
/// assert_eq!(event.identifier(), "tag_create_42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Who acted
    pub actor: Actor,
    /// Response handle
    pub token: InteractionToken,
    /// Permissions the platform granted the bot for this interaction
    pub app_permissions: PermissionSet,
    /// Variant payload
    pub payload: EventPayload,
}

impl InboundEvent {
    /// Create an event with no granted permissions.
    pub fn new(actor: Actor, token: InteractionToken, payload: EventPayload) -> Self {
        Self {
            actor,
            token,
            app_permissions: PermissionSet::empty(),
            payload,
        }
    }

    /// Slash command event.
    pub fn chat_command(actor: Actor, token: InteractionToken, command: CommandEvent) -> Self {
        Self::new(actor, token, EventPayload::ChatCommand(command))
    }

    /// Autocomplete event.
    pub fn autocomplete(actor: Actor, token: InteractionToken, event: AutocompleteEvent) -> Self {
        Self::new(actor, token, EventPayload::Autocomplete(event))
    }

    /// Button event.
    pub fn button(actor: Actor, token: InteractionToken, custom_id: impl Into<String>) -> Self {
        Self::new(
            actor,
            token,
            EventPayload::Button(ComponentEvent {
                custom_id: custom_id.into(),
                message_id: 0,
            }),
        )
    }

    /// Modal submission event.
    pub fn modal_submit(actor: Actor, token: InteractionToken, modal: ModalEvent) -> Self {
        Self::new(actor, token, EventPayload::ModalSubmit(modal))
    }

    /// Set the permissions granted to the bot.
    pub fn with_app_permissions(mut self, permissions: PermissionSet) -> Self {
        self.app_permissions = permissions;
        self
    }

    /// Payload discriminant.
    pub fn kind(&self) -> EventKind {
        match &self.payload {
            EventPayload::ChatCommand(_) => EventKind::ChatCommand,
            EventPayload::ContextMenuCommand(_) => EventKind::ContextMenuCommand,
            EventPayload::Autocomplete(_) => EventKind::Autocomplete,
            EventPayload::Button(_) => EventKind::Button,
            EventPayload::ModalSubmit(_) => EventKind::ModalSubmit,
        }
    }

    /// Command name for command-shaped events, custom id for components and modals.
    pub fn identifier(&self) -> &str {
        match &self.payload {
            EventPayload::ChatCommand(command) | EventPayload::ContextMenuCommand(command) => {
                &command.name
            }
            EventPayload::Autocomplete(event) => &event.command.name,
            EventPayload::Button(component) => &component.custom_id,
            EventPayload::ModalSubmit(modal) => &modal.custom_id,
        }
    }

    /// Acting user.
    pub fn user_id(&self) -> UserId {
        self.actor.user_id
    }

    /// Guild the event happened in.
    pub fn guild_id(&self) -> Option<GuildId> {
        self.actor.guild_id
    }

    /// True for modal submissions.
    pub fn is_modal_submit(&self) -> bool {
        matches!(self.payload, EventPayload::ModalSubmit(_))
    }

    /// True for button activations.
    pub fn is_button(&self) -> bool {
        matches!(self.payload, EventPayload::Button(_))
    }

    /// Modal payload, if this is a modal submission.
    pub fn as_modal(&self) -> Option<&ModalEvent> {
        match &self.payload {
            EventPayload::ModalSubmit(modal) => Some(modal),
            _ => None,
        }
    }

    /// Command payload, if this is a chat or context-menu command.
    pub fn as_command(&self) -> Option<&CommandEvent> {
        match &self.payload {
            EventPayload::ChatCommand(command) | EventPayload::ContextMenuCommand(command) => {
                Some(command)
            }
            _ => None,
        }
    }
}
