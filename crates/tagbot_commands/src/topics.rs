//! `/topics list|add`.

use crate::{require_guild, require_support_role};
use async_trait::async_trait;
use std::sync::Arc;
use tagbot_core::{
    CommandDefinition, GuildId, InboundEvent, OptionDefinition, OptionKind, Permission, Reply,
};
use tagbot_error::{InteractionError, InteractionErrorKind, TagbotResult};
use tagbot_interactions::{
    CommandDescriptor, CommandHandler, InteractionContext, PageRenderer, PageView, SessionKey,
    navigation_row, paginate,
};
use tagbot_security::PermissionGate;
use tagbot_storage::GuildSettingsStore;
use tracing::{debug, instrument};

/// Button namespace of the topics list.
pub const TOPICS_NAMESPACE: &str = "add_topic_subcommand_button";

/// Rows per topics page.
pub const TOPICS_PER_PAGE: usize = 10;

const NO_TOPICS_MESSAGE: &str = "> There are no topics configured in this server yet!";

/// Handles `/topics list|add`. `add` requires the support role.
#[derive(Clone)]
pub struct TopicsCommand {
    settings: Arc<dyn GuildSettingsStore>,
    gate: PermissionGate,
}

impl TopicsCommand {
    /// Create the handler.
    pub fn new(settings: Arc<dyn GuildSettingsStore>, gate: PermissionGate) -> Self {
        Self { settings, gate }
    }

    async fn list(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        guild_id: GuildId,
    ) -> TagbotResult<()> {
        let topics = self.settings.topics(guild_id).await?;
        if topics.is_empty() {
            return ctx
                .responder()
                .reply(&event.token, Reply::text(NO_TOPICS_MESSAGE).ephemeral())
                .await;
        }

        let key = SessionKey::new(event.user_id(), TOPICS_NAMESPACE);
        let view = ctx.sessions().open(key, paginate(topics, TOPICS_PER_PAGE))?;
        ctx.responder()
            .reply(&event.token, TopicsRenderer.render(ctx, &view))
            .await
    }

    async fn add(
        &self,
        ctx: &InteractionContext,
        event: &InboundEvent,
        guild_id: GuildId,
        topic: String,
    ) -> TagbotResult<()> {
        if !self.settings.add_topic(guild_id, topic.clone()).await? {
            let message = format!("> The topic `{}` already exists!", topic);
            return ctx
                .responder()
                .reply(&event.token, Reply::text(message).ephemeral())
                .await;
        }
        debug!(topic = %topic, "Added topic");
        self.list(ctx, event, guild_id).await
    }
}

#[async_trait]
impl CommandHandler for TopicsCommand {
    #[instrument(skip_all, fields(user_id = %event.user_id()))]
    async fn handle(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<()> {
        let Some(command) = event.as_command() else {
            return Ok(());
        };
        let Some(guild_id) = require_guild(ctx, event).await? else {
            return Ok(());
        };

        match command.subcommand.as_deref() {
            Some("list") => self.list(ctx, event, guild_id).await?,
            Some("add") => {
                let topic = command
                    .string_option("topic")
                    .map(str::trim)
                    .filter(|topic| !topic.is_empty())
                    .ok_or_else(|| {
                        InteractionError::new(InteractionErrorKind::MissingField {
                            interaction: command.name.clone(),
                            field: "topic".to_string(),
                        })
                    })?
                    .to_string();
                if require_support_role(&self.gate, ctx, event).await? {
                    self.add(ctx, event, guild_id, topic).await?;
                }
            }
            other => debug!(subcommand = ?other, "Unknown topics subcommand"),
        }
        Ok(())
    }
}

/// Renders a page of configured topics.
///
/// The footer total counts the topics captured when the list was opened, so
/// it always agrees with the rows being paged through. Topics added since
/// then show up once the list is reopened.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicsRenderer;

impl PageRenderer for TopicsRenderer {
    fn render(&self, ctx: &InteractionContext, view: &PageView) -> Reply {
        let description = view
            .rows
            .iter()
            .enumerate()
            .map(|(i, topic)| format!("**{}.** *{}*", view.first_ordinal + i, topic))
            .collect::<Vec<_>>()
            .join("\n");

        let embed = ctx
            .embed()
            .with_title("Current Topics in Configuration")
            .with_description(description)
            .with_footer(format!(
                "Page: {}/{} • Total Topics: {}",
                view.page_number(),
                view.page_count,
                view.total_items
            ));

        Reply::embed(embed).with_row(navigation_row(view))
    }
}

pub(crate) fn descriptor(
    settings: Arc<dyn GuildSettingsStore>,
    gate: PermissionGate,
) -> TagbotResult<CommandDescriptor> {
    let definition = CommandDefinition::chat_input("topics", "Discussion topics for this server")
        .with_option(OptionDefinition::subcommand("list", "List the configured topics"))
        .with_option(
            OptionDefinition::subcommand("add", "Add a topic").with_option(
                OptionDefinition::new(OptionKind::String, "topic", "Topic to add").required(),
            ),
        );

    CommandDescriptor::builder()
        .definition(definition)
        .handler(TopicsCommand::new(settings, gate))
        .require_permission(Permission::SendMessages)
        .require_permission(Permission::EmbedLinks)
        .build()
}
