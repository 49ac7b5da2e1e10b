//! `/tag` and its subcommands.

mod autocomplete;
mod list;
mod modal;

pub use autocomplete::TagAutocomplete;
pub use list::TagListRenderer;

use crate::{require_guild, require_support_role};
use async_trait::async_trait;
use std::sync::Arc;
use tagbot_core::{
    CommandDefinition, CommandEvent, Embed, GuildId, InboundEvent, OptionDefinition, OptionKind,
    Permission, Reply, owned_element_id,
};
use tagbot_error::{InteractionError, InteractionErrorKind, TagbotResult};
use tagbot_interactions::{
    CommandDescriptor, CommandHandler, InteractionContext, OneShotBinding, PageRenderer,
    SessionKey, paginate,
};
use tagbot_security::PermissionGate;
use tagbot_storage::{Tag, TagStore, TagValidator};
use tracing::{debug, instrument};

/// Element namespace of the create modal.
pub const TAG_CREATE_MODAL: &str = "tag_create";

/// Element namespace of the edit modal.
pub const TAG_EDIT_MODAL: &str = "tag_edit";

/// Button namespace of the tag list.
pub const TAG_LIST_NAMESPACE: &str = "list_subcommand_button";

/// Rows per tag list page.
pub const TAGS_PER_PAGE: usize = 10;

const NO_TAGS_MESSAGE: &str = "> There are no support tags in this server yet!";
const INVALID_IMAGE_MESSAGE: &str = "> The provided image link is not a valid image URL!";

fn already_exists(name: &str) -> String {
    format!("> The support tag `{}` already exists!", name)
}

fn does_not_exist(name: &str) -> String {
    format!("> The support tag `{}` doesn't exist!", name)
}

/// Handles `/tag create|edit|show|delete|list`.
///
/// `create`, `edit` and `delete` additionally require the configured support
/// role.
#[derive(Clone)]
pub struct TagCommand {
    tags: Arc<dyn TagStore>,
    gate: PermissionGate,
    validator: TagValidator,
}

impl TagCommand {
    /// Create the handler.
    pub fn new(tags: Arc<dyn TagStore>, gate: PermissionGate, validator: TagValidator) -> Self {
        Self {
            tags,
            gate,
            validator,
        }
    }

    /// Open the create modal and wait for its submission.
    async fn create(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<()> {
        let owner = event.user_id();
        let modal_id = owned_element_id(TAG_CREATE_MODAL, owner);

        let handler = self.clone();
        ctx.listeners()
            .register(OneShotBinding::modal(&modal_id, owner, move |ctx, event| async move {
                handler.submit_create(&ctx, &event).await
            }));

        let opened = ctx
            .responder()
            .open_modal(&event.token, modal::create_form(&modal_id))
            .await;
        if opened.is_err() {
            ctx.listeners().cancel(&modal_id, owner);
        }
        opened
    }

    /// Open the edit modal prefilled with the tag's current values.
    async fn edit(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        guild_id: GuildId,
        name: String,
    ) -> TagbotResult<()> {
        let Some(tag) = self.tags.get(guild_id, &name).await? else {
            return reply_ephemeral(ctx, event, does_not_exist(&name)).await;
        };

        let owner = event.user_id();
        let modal_id = owned_element_id(TAG_EDIT_MODAL, owner);

        let handler = self.clone();
        ctx.listeners()
            .register(OneShotBinding::modal(&modal_id, owner, move |ctx, event| async move {
                handler.submit_edit(&ctx, &event, &name).await
            }));

        let opened = ctx
            .responder()
            .open_modal(&event.token, modal::edit_form(&modal_id, &tag))
            .await;
        if opened.is_err() {
            ctx.listeners().cancel(&modal_id, owner);
        }
        opened
    }

    async fn show(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        guild_id: GuildId,
        name: &str,
    ) -> TagbotResult<()> {
        match self.tags.get(guild_id, name).await? {
            Some(tag) => {
                ctx.responder()
                    .reply(&event.token, Reply::embed(tag_embed(ctx, &tag)))
                    .await
            }
            None => reply_ephemeral(ctx, event, does_not_exist(name)).await,
        }
    }

    async fn delete(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        guild_id: GuildId,
        name: &str,
    ) -> TagbotResult<()> {
        if self.tags.delete(guild_id, name).await? {
            reply_ephemeral(ctx, event, format!("✅ Successfully deleted `{}`!", name)).await
        } else {
            reply_ephemeral(ctx, event, does_not_exist(name)).await
        }
    }

    /// Start a tag list session for the actor and show its first page.
    async fn list(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        guild_id: GuildId,
    ) -> TagbotResult<()> {
        let tags = self.tags.list(guild_id).await?;
        if tags.is_empty() {
            return reply_ephemeral(ctx, event, NO_TAGS_MESSAGE).await;
        }

        let rows: Vec<String> = tags.iter().map(list::row).collect();
        let key = SessionKey::new(event.user_id(), TAG_LIST_NAMESPACE);
        let view = ctx.sessions().open(key, paginate(rows, TAGS_PER_PAGE))?;
        debug!(tags = tags.len(), pages = view.page_count, "Opened tag list");

        let reply = TagListRenderer.render(ctx, &view);
        ctx.responder().reply(&event.token, reply).await
    }
}

#[async_trait]
impl CommandHandler for TagCommand {
    #[instrument(skip_all, fields(user_id = %event.user_id()))]
    async fn handle(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<()> {
        let Some(command) = event.as_command() else {
            return Ok(());
        };
        let Some(guild_id) = require_guild(ctx, event).await? else {
            return Ok(());
        };

        match command.subcommand.as_deref() {
            Some("create") => {
                if require_support_role(&self.gate, ctx, event).await? {
                    self.create(ctx, event).await?;
                }
            }
            Some("edit") => {
                let name = required_name(command)?;
                if require_support_role(&self.gate, ctx, event).await? {
                    self.edit(ctx, event, guild_id, name).await?;
                }
            }
            Some("delete") => {
                let name = required_name(command)?;
                if require_support_role(&self.gate, ctx, event).await? {
                    self.delete(ctx, event, guild_id, &name).await?;
                }
            }
            Some("show") => {
                let name = required_name(command)?;
                self.show(ctx, event, guild_id, &name).await?;
            }
            Some("list") => self.list(ctx, event, guild_id).await?,
            other => debug!(subcommand = ?other, "Unknown tag subcommand"),
        }
        Ok(())
    }
}

fn required_name(command: &CommandEvent) -> TagbotResult<String> {
    let name = command
        .string_option("name")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            InteractionError::new(InteractionErrorKind::MissingField {
                interaction: command.name.clone(),
                field: "name".to_string(),
            })
        })?;
    Ok(name.to_string())
}

async fn reply_ephemeral(
    ctx: &InteractionContext,
    event: &InboundEvent,
    message: impl Into<String>,
) -> TagbotResult<()> {
    ctx.responder()
        .reply(&event.token, Reply::text(message).ephemeral())
        .await
}

/// Embed showing a tag.
fn tag_embed(ctx: &InteractionContext, tag: &Tag) -> Embed {
    let mut embed = ctx.embed().with_title(tag.title.as_str());
    embed.description = tag.description.clone();
    embed.footer = tag.footer.clone();
    embed.image_url = tag.image_url.clone();
    embed
}

fn name_option() -> OptionDefinition {
    OptionDefinition::new(OptionKind::String, "name", "Name of the tag")
        .required()
        .autocomplete()
}

pub(crate) fn descriptor(
    tags: Arc<dyn TagStore>,
    gate: PermissionGate,
    validator: TagValidator,
) -> TagbotResult<CommandDescriptor> {
    let definition = CommandDefinition::chat_input("tag", "Manage the server's support tags")
        .with_option(OptionDefinition::subcommand("create", "Create a support tag"))
        .with_option(OptionDefinition::subcommand("edit", "Edit a support tag").with_option(name_option()))
        .with_option(OptionDefinition::subcommand("show", "Show a support tag").with_option(name_option()))
        .with_option(
            OptionDefinition::subcommand("delete", "Delete a support tag").with_option(name_option()),
        )
        .with_option(OptionDefinition::subcommand("list", "List the server's support tags"));

    CommandDescriptor::builder()
        .definition(definition)
        .handler(TagCommand::new(tags.clone(), gate, validator))
        .autocomplete(TagAutocomplete::new(tags))
        .require_permission(Permission::SendMessages)
        .require_permission(Permission::EmbedLinks)
        .build()
}
