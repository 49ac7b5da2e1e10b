//! Engine payloads to serenity builders.

use serenity::all::{
    ButtonStyle as DiscordButtonStyle, CommandOptionType, CommandType, CreateActionRow,
    CreateAutocompleteResponse, CreateButton, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateEmbedFooter, CreateInputText, CreateInteractionResponseMessage, CreateModal,
    InputTextStyle,
};
use tagbot_core::{
    AutocompleteChoice, ButtonRow, ButtonStyle, CommandDefinition, CommandKind, Embed, ModalForm,
    OptionDefinition, OptionKind, Reply, TextInput, TextInputStyle,
};

/// Message body for a reply or an update.
pub fn response_message(reply: Reply) -> CreateInteractionResponseMessage {
    let mut message = CreateInteractionResponseMessage::new()
        .embeds(reply.embeds.into_iter().map(embed).collect())
        .components(reply.components.into_iter().map(button_row).collect());
    if let Some(content) = reply.content {
        message = message.content(content);
    }
    if reply.ephemeral {
        message = message.ephemeral(true);
    }
    message
}

/// Modal dialog with one text input per row.
pub fn create_modal(form: ModalForm) -> CreateModal {
    let rows = form
        .inputs
        .into_iter()
        .map(|input| CreateActionRow::InputText(text_input(input)))
        .collect();
    CreateModal::new(form.custom_id, form.title).components(rows)
}

/// Autocomplete suggestions.
pub fn autocomplete_response(choices: Vec<AutocompleteChoice>) -> CreateAutocompleteResponse {
    choices
        .into_iter()
        .fold(CreateAutocompleteResponse::new(), |response, choice| {
            response.add_string_choice(choice.name, choice.value)
        })
}

/// Application command as published to the platform.
pub fn create_command(definition: &CommandDefinition) -> CreateCommand {
    let command = CreateCommand::new(definition.name.as_str());
    let command = match definition.kind {
        CommandKind::ChatInput => command
            .kind(CommandType::ChatInput)
            .description(definition.description.as_str()),
        CommandKind::User => command.kind(CommandType::User),
        CommandKind::Message => command.kind(CommandType::Message),
    };
    definition
        .options
        .iter()
        .fold(command, |command, option| command.add_option(command_option(option)))
}

fn command_option(option: &OptionDefinition) -> CreateCommandOption {
    let kind = match option.kind {
        OptionKind::SubCommand => CommandOptionType::SubCommand,
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::User => CommandOptionType::User,
        OptionKind::Role => CommandOptionType::Role,
        OptionKind::Channel => CommandOptionType::Channel,
    };
    let created = CreateCommandOption::new(kind, option.name.as_str(), option.description.as_str())
        .required(option.required)
        .set_autocomplete(option.autocomplete);
    option
        .options
        .iter()
        .fold(created, |created, nested| created.add_sub_option(command_option(nested)))
}

fn embed(embed: Embed) -> CreateEmbed {
    let mut created = CreateEmbed::new().colour(embed.color);
    if let Some(title) = embed.title {
        created = created.title(title);
    }
    if let Some(description) = embed.description {
        created = created.description(description);
    }
    if let Some(footer) = embed.footer {
        created = created.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(url) = embed.thumbnail_url {
        created = created.thumbnail(url);
    }
    if let Some(url) = embed.image_url {
        created = created.image(url);
    }
    created
}

fn button_row(row: ButtonRow) -> CreateActionRow {
    let buttons = row
        .buttons
        .into_iter()
        .map(|button| {
            let style = match button.style {
                ButtonStyle::Primary => DiscordButtonStyle::Primary,
                ButtonStyle::Secondary => DiscordButtonStyle::Secondary,
                ButtonStyle::Success => DiscordButtonStyle::Success,
                ButtonStyle::Danger => DiscordButtonStyle::Danger,
            };
            CreateButton::new(button.custom_id)
                .label(button.label)
                .style(style)
                .disabled(button.disabled)
        })
        .collect();
    CreateActionRow::Buttons(buttons)
}

fn text_input(input: TextInput) -> CreateInputText {
    let style = match input.style {
        TextInputStyle::Short => InputTextStyle::Short,
        TextInputStyle::Paragraph => InputTextStyle::Paragraph,
    };
    let mut created =
        CreateInputText::new(style, input.label, input.custom_id).required(input.required);
    if let Some(value) = input.value {
        created = created.value(value);
    }
    if let Some(placeholder) = input.placeholder {
        created = created.placeholder(placeholder);
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::CreateInteractionResponse;
    use tagbot_core::Button;

    #[test]
    fn test_reply_serializes_content_embed_and_buttons() {
        let reply = Reply::embed(Embed::default().with_title("Server Tag List"))
            .with_row(ButtonRow::new(vec![
                Button::new("list_subcommand_button_next_42", "Next", ButtonStyle::Primary)
                    .disabled(true),
            ]));
        let json = serde_json::to_value(CreateInteractionResponse::Message(response_message(reply)))
            .unwrap();

        let data = &json["data"];
        assert_eq!(data["embeds"][0]["title"], "Server Tag List");
        assert_eq!(
            data["components"][0]["components"][0]["custom_id"],
            "list_subcommand_button_next_42"
        );
        assert_eq!(data["components"][0]["components"][0]["disabled"], true);
    }

    #[test]
    fn test_text_reply_content() {
        let json = serde_json::to_value(CreateInteractionResponse::Message(response_message(
            Reply::text("Pong!"),
        )))
        .unwrap();
        assert_eq!(json["data"]["content"], "Pong!");
    }

    #[test]
    fn test_command_definition_nests_subcommands() {
        let definition = CommandDefinition::chat_input("tag", "Manage tags").with_option(
            OptionDefinition::subcommand("show", "Show a tag").with_option(
                OptionDefinition::new(OptionKind::String, "name", "Tag name")
                    .required()
                    .autocomplete(),
            ),
        );
        let json = serde_json::to_value(create_command(&definition)).unwrap();

        assert_eq!(json["name"], "tag");
        assert_eq!(json["description"], "Manage tags");
        assert_eq!(json["options"][0]["name"], "show");
        assert_eq!(json["options"][0]["options"][0]["name"], "name");
        assert_eq!(json["options"][0]["options"][0]["required"], true);
        assert_eq!(json["options"][0]["options"][0]["autocomplete"], true);
    }

    #[test]
    fn test_modal_has_one_row_per_input() {
        let form = ModalForm::new("tag_create_42", "Create")
            .with_input(TextInput::new("tag_create_embed_name", "Name"))
            .with_input(TextInput::new("tag_create_embed_title", "Title").with_value("FAQ"));
        let json = serde_json::to_value(create_modal(form)).unwrap();

        assert_eq!(json["custom_id"], "tag_create_42");
        assert_eq!(json["components"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["components"][1]["components"][0]["value"], "FAQ");
    }
}
