//! Create and edit modals.

use super::{
    INVALID_IMAGE_MESSAGE, TagCommand, already_exists, does_not_exist, reply_ephemeral, tag_embed,
};
use tagbot_core::{InboundEvent, ModalEvent, ModalForm, Reply, TextInput, TextInputStyle};
use tagbot_error::{
    InteractionError, InteractionErrorKind, StorageErrorKind, TagbotError, TagbotErrorKind,
    TagbotResult,
};
use tagbot_interactions::InteractionContext;
use tagbot_storage::{Tag, TagUpdate};
use tracing::{debug, instrument};

const CREATE_NAME: &str = "tag_create_embed_name";
const CREATE_TITLE: &str = "tag_create_embed_title";
const CREATE_DESCRIPTION: &str = "tag_create_embed_description";
const CREATE_IMAGE_URL: &str = "tag_create_embed_image_url";
const CREATE_FOOTER: &str = "tag_create_embed_footer";

const EDIT_TITLE: &str = "tag_edit_embed_title";
const EDIT_DESCRIPTION: &str = "tag_edit_embed_description";
const EDIT_IMAGE_URL: &str = "tag_edit_embed_image_url";
const EDIT_FOOTER: &str = "tag_edit_embed_footer";

pub(super) fn create_form(modal_id: &str) -> ModalForm {
    ModalForm::new(modal_id, "Create a support tag")
        .with_input(TextInput::new(CREATE_NAME, "Name").with_placeholder("faq"))
        .with_input(TextInput::new(CREATE_TITLE, "Title"))
        .with_input(
            TextInput::new(CREATE_DESCRIPTION, "Description")
                .with_style(TextInputStyle::Paragraph)
                .with_required(false),
        )
        .with_input(
            TextInput::new(CREATE_IMAGE_URL, "Image URL")
                .with_required(false)
                .with_placeholder("https://example.com/image.png"),
        )
        .with_input(TextInput::new(CREATE_FOOTER, "Footer").with_required(false))
}

pub(super) fn edit_form(modal_id: &str, tag: &Tag) -> ModalForm {
    let prefilled = |input: TextInput, value: &Option<String>| match value {
        Some(value) => input.with_value(value.as_str()),
        None => input,
    };

    ModalForm::new(modal_id, format!("Edit {}", tag.name))
        .with_input(TextInput::new(EDIT_TITLE, "Title").with_value(tag.title.as_str()))
        .with_input(prefilled(
            TextInput::new(EDIT_DESCRIPTION, "Description")
                .with_style(TextInputStyle::Paragraph)
                .with_required(false),
            &tag.description,
        ))
        .with_input(prefilled(
            TextInput::new(EDIT_IMAGE_URL, "Image URL").with_required(false),
            &tag.image_url,
        ))
        .with_input(prefilled(
            TextInput::new(EDIT_FOOTER, "Footer").with_required(false),
            &tag.footer,
        ))
}

fn storage_kind(error: &TagbotError) -> Option<&StorageErrorKind> {
    match error.kind() {
        TagbotErrorKind::Storage(storage) => Some(storage.kind()),
        _ => None,
    }
}

fn required_field(modal: &ModalEvent, field: &str) -> TagbotResult<String> {
    let value = modal.non_empty_field(field).ok_or_else(|| {
        InteractionError::new(InteractionErrorKind::MissingField {
            interaction: modal.custom_id.clone(),
            field: field.to_string(),
        })
    })?;
    Ok(value)
}

impl TagCommand {
    fn image_url_is_valid(&self, image_url: &Option<String>) -> bool {
        image_url
            .as_deref()
            .is_none_or(|url| self.validator.is_image_url(url))
    }

    #[instrument(skip_all, fields(user_id = %event.user_id()))]
    pub(super) async fn submit_create(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
    ) -> TagbotResult<()> {
        let (Some(modal), Some(guild_id)) = (event.as_modal(), event.guild_id()) else {
            return Ok(());
        };

        let name = required_field(modal, CREATE_NAME)?;
        if self.tags.exists(guild_id, &name).await? {
            return reply_ephemeral(ctx, event, already_exists(&name)).await;
        }

        let image_url = modal.non_empty_field(CREATE_IMAGE_URL);
        if !self.image_url_is_valid(&image_url) {
            return reply_ephemeral(ctx, event, INVALID_IMAGE_MESSAGE).await;
        }

        let mut tag = Tag::new(&name, required_field(modal, CREATE_TITLE)?).with_author(event.user_id());
        tag.description = modal.non_empty_field(CREATE_DESCRIPTION);
        tag.footer = modal.non_empty_field(CREATE_FOOTER);
        tag.image_url = image_url;

        // A concurrent submission may have created the same name since the check.
        match self.tags.create(guild_id, tag.clone()).await {
            Ok(()) => debug!(name = %name, "Created tag"),
            Err(e) if matches!(storage_kind(&e), Some(StorageErrorKind::AlreadyExists(_))) => {
                debug!(name = %name, "Tag created concurrently");
                return reply_ephemeral(ctx, event, already_exists(&name)).await;
            }
            Err(e) => return Err(e),
        }

        let reply = Reply::text(format!("✅ Successfully created `{}`!", name))
            .with_embed(tag_embed(ctx, &tag))
            .ephemeral();
        ctx.responder().reply(&event.token, reply).await
    }

    #[instrument(skip_all, fields(user_id = %event.user_id(), name = %name))]
    pub(super) async fn submit_edit(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        name: &str,
    ) -> TagbotResult<()> {
        let (Some(modal), Some(guild_id)) = (event.as_modal(), event.guild_id()) else {
            return Ok(());
        };

        if !self.tags.exists(guild_id, name).await? {
            return reply_ephemeral(ctx, event, does_not_exist(name)).await;
        }

        let image_url = modal.non_empty_field(EDIT_IMAGE_URL);
        if !self.image_url_is_valid(&image_url) {
            return reply_ephemeral(ctx, event, INVALID_IMAGE_MESSAGE).await;
        }

        let update = TagUpdate {
            title: modal.non_empty_field(EDIT_TITLE),
            description: modal.non_empty_field(EDIT_DESCRIPTION),
            footer: modal.non_empty_field(EDIT_FOOTER),
            image_url,
            edited_by: event.user_id(),
        };
        let tag = match self.tags.update(guild_id, name, update).await {
            Ok(tag) => tag,
            Err(e) if matches!(storage_kind(&e), Some(StorageErrorKind::NotFound(_))) => {
                debug!("Tag deleted before the edit landed");
                return reply_ephemeral(ctx, event, does_not_exist(name)).await;
            }
            Err(e) => return Err(e),
        };
        debug!("Edited tag");

        let reply = Reply::text(format!("✅ Successfully edited `{}`!", name))
            .with_embed(tag_embed(ctx, &tag))
            .ephemeral();
        ctx.responder().reply(&event.token, reply).await
    }
}
