//! Outbound response payloads.
//!
//! These are plain data; the transport crate maps them onto serenity builders.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Default embed accent colour.
const DEFAULT_EMBED_COLOR: u32 = 0x323338;

/// A rich embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct Embed {
    /// Title line
    pub title: Option<String>,
    /// Body text
    pub description: Option<String>,
    /// Accent colour
    pub color: u32,
    /// Footer text
    pub footer: Option<String>,
    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
    /// Main image URL
    pub image_url: Option<String>,
}

impl Default for Embed {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            color: DEFAULT_EMBED_COLOR,
            footer: None,
            thumbnail_url: None,
            image_url: None,
        }
    }
}

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ButtonStyle {
    /// Blurple
    #[default]
    Primary,
    /// Grey
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
}

/// An interactive button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Encoded identifier echoed back on click
    pub custom_id: String,
    /// Visible label
    pub label: String,
    /// Style
    pub style: ButtonStyle,
    /// Greyed out and unclickable
    pub disabled: bool,
}

impl Button {
    /// Create an enabled button.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
            disabled: false,
        }
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A row of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonRow {
    /// Buttons, left to right
    pub buttons: Vec<Button>,
}

impl ButtonRow {
    /// Create a row.
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }
}

/// A message sent in reply to an interaction, or replacing the message a
/// component is attached to.
///
/// # Examples
///
/// ```
/// use tagbot_core::Reply;
///
/// let reply = Reply::text("Pong!").ephemeral();
/// assert_eq!(reply.content.as_deref(), Some("Pong!"));
/// assert!(reply.ephemeral);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reply {
    /// Plain text content
    pub content: Option<String>,
    /// Visible only to the invoking user
    pub ephemeral: bool,
    /// Embeds
    pub embeds: Vec<Embed>,
    /// Component rows
    pub components: Vec<ButtonRow>,
}

impl Reply {
    /// Text-only reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Embed-only reply.
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    /// Mark the reply ephemeral.
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Append an embed.
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Append a component row.
    pub fn with_row(mut self, row: ButtonRow) -> Self {
        self.components.push(row);
        self
    }
}

/// Text input style inside a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextInputStyle {
    /// Single line
    #[default]
    Short,
    /// Multi-line
    Paragraph,
}

/// A text input inside a modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct TextInput {
    /// Identifier the submitted value is keyed by
    #[setters(skip)]
    pub custom_id: String,
    /// Visible label
    #[setters(skip)]
    pub label: String,
    /// Style
    pub style: TextInputStyle,
    /// Submission requires a value
    pub required: bool,
    /// Prefilled value
    #[setters(strip_option, into)]
    pub value: Option<String>,
    /// Placeholder text
    #[setters(strip_option, into)]
    pub placeholder: Option<String>,
}

impl TextInput {
    /// Create a required single-line input.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style: TextInputStyle::Short,
            required: true,
            value: None,
            placeholder: None,
        }
    }
}

/// A modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalForm {
    /// Encoded identifier echoed back on submit
    pub custom_id: String,
    /// Dialog title
    pub title: String,
    /// Inputs, top to bottom
    pub inputs: Vec<TextInput>,
}

impl ModalForm {
    /// Create an empty modal.
    pub fn new(custom_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            title: title.into(),
            inputs: Vec::new(),
        }
    }

    /// Append an input.
    pub fn with_input(mut self, input: TextInput) -> Self {
        self.inputs.push(input);
        self
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteChoice {
    /// Label shown to the user
    pub name: String,
    /// Value submitted when picked
    pub value: String,
}

impl AutocompleteChoice {
    /// Choice whose label and value are the same.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: value.clone(),
            value,
        }
    }
}
