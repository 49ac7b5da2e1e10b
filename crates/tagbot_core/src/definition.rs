//! Platform command definitions.
//!
//! A [`CommandDefinition`] is what gets published to the platform so users see
//! the command in their client. The transport maps it onto serenity's
//! `CreateCommand`.

use serde::{Deserialize, Serialize};

/// How the command is invoked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    /// Slash command
    #[default]
    ChatInput,
    /// Right-click on a user
    User,
    /// Right-click on a message
    Message,
}

/// Type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum OptionKind {
    /// Nested subcommand
    SubCommand,
    /// Free text
    String,
    /// Whole number
    Integer,
    /// True or false
    Boolean,
    /// User mention
    User,
    /// Role mention
    Role,
    /// Channel
    Channel,
}

/// One option in a command definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Option name
    pub name: String,
    /// Help text
    pub description: String,
    /// Option type
    pub kind: OptionKind,
    /// Must be supplied
    pub required: bool,
    /// Values come from the command's autocomplete handler
    pub autocomplete: bool,
    /// Nested options for subcommands
    pub options: Vec<OptionDefinition>,
}

impl OptionDefinition {
    /// Create an optional option.
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
            autocomplete: false,
            options: Vec::new(),
        }
    }

    /// Create a subcommand.
    pub fn subcommand(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionKind::SubCommand, name, description)
    }

    /// Mark the option required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Enable autocomplete.
    pub fn autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }

    /// Append a nested option.
    pub fn with_option(mut self, option: OptionDefinition) -> Self {
        self.options.push(option);
        self
    }
}

/// A command as published to the platform.
///
/// # Examples
///
/// ```
/// use tagbot_core::{CommandDefinition, OptionDefinition, OptionKind};
///
/// let tag = CommandDefinition::chat_input("tag", "Manage support tags").with_option(
///     OptionDefinition::subcommand("show", "Show a tag").with_option(
///         OptionDefinition::new(OptionKind::String, "name", "Tag name").required().autocomplete(),
///     ),
/// );
/// assert_eq!(tag.options[0].options[0].name, "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Command name, also the registry identifier
    pub name: String,
    /// Help text; ignored by the platform for context-menu commands
    pub description: String,
    /// Invocation kind
    pub kind: CommandKind,
    /// Top-level options
    pub options: Vec<OptionDefinition>,
}

impl CommandDefinition {
    /// Slash command definition.
    pub fn chat_input(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: CommandKind::ChatInput,
            options: Vec::new(),
        }
    }

    /// Context-menu command definition.
    pub fn context_menu(kind: CommandKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            options: Vec::new(),
        }
    }

    /// Append an option.
    pub fn with_option(mut self, option: OptionDefinition) -> Self {
        self.options.push(option);
        self
    }
}
