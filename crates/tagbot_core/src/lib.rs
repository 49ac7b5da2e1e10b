//! Core data types for the tagbot interaction engine.
//!
//! These types are transport-agnostic: the Discord adapter converts serenity
//! models into them on the way in and maps the response payloads back into
//! serenity builders on the way out.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod custom_id;
mod definition;
mod event;
mod ids;
mod permission;
mod response;

pub use custom_id::{CustomId, owned_element_id};
pub use definition::{CommandDefinition, CommandKind, OptionDefinition, OptionKind};
pub use event::{
    Actor, AutocompleteEvent, CommandEvent, CommandOption, ComponentEvent, EventKind, EventPayload,
    FocusedOption, InboundEvent, InteractionToken, ModalEvent, OptionValue,
};
pub use ids::{ConfigRoleName, GuildId, RoleId, UserId};
pub use permission::{Permission, PermissionSet};
pub use response::{
    AutocompleteChoice, Button, ButtonRow, ButtonStyle, Embed, ModalForm, Reply, TextInput,
    TextInputStyle,
};
