//! The assembled engine, driven through a recording responder.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tagbot::{BotConfig, FileConfig, TagbotApp, command_registry, describe};
use tagbot_core::{
    Actor, AutocompleteChoice, CommandEvent, GuildId, InboundEvent, InteractionToken, ModalForm,
    Permission, PermissionSet, Reply, UserId,
};
use tagbot_error::TagbotResult;
use tagbot_interactions::{DispatchOutcome, Responder};
use tagbot_storage::GuildSettingsStore;

#[derive(Default)]
struct Recorder {
    replies: Mutex<Vec<Reply>>,
}

#[async_trait]
impl Responder for Recorder {
    async fn reply(&self, _token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        self.replies.lock().push(reply);
        Ok(())
    }

    async fn update_message(&self, _token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        self.replies.lock().push(reply);
        Ok(())
    }

    async fn open_modal(&self, _token: &InteractionToken, _modal: ModalForm) -> TagbotResult<()> {
        Ok(())
    }

    async fn autocomplete(
        &self,
        _token: &InteractionToken,
        _choices: Vec<AutocompleteChoice>,
    ) -> TagbotResult<()> {
        Ok(())
    }
}

fn config() -> BotConfig {
    let file = FileConfig::parse(
        "[[guilds]]\nid = 1\ntopics = [\"Rust\"]\n[guilds.roles]\nsupport = [10]\n",
    )
    .unwrap();
    BotConfig::new("token").with_embed_color(0xFF0000).with_file(file)
}

fn topics_list(permissions: PermissionSet) -> InboundEvent {
    InboundEvent::chat_command(
        Actor::new(UserId::new(5), Some(GuildId::new(1))),
        InteractionToken::new(1, "token"),
        CommandEvent::new("topics").with_subcommand("list"),
    )
    .with_app_permissions(permissions)
}

#[tokio::test]
async fn test_seeded_app_serves_topics_in_configured_colour() {
    let recorder = Arc::new(Recorder::default());
    let app = TagbotApp::build(&config(), recorder.clone()).unwrap();
    assert_eq!(app.store().topics(GuildId::new(1)).await.unwrap(), vec!["Rust".to_string()]);

    let granted: PermissionSet = [Permission::SendMessages, Permission::EmbedLinks]
        .into_iter()
        .collect();
    let outcome = app.dispatcher().dispatch(&topics_list(granted)).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::HandlerInvoked { command: "topics".into() });

    let replies = recorder.replies.lock();
    assert_eq!(replies[0].embeds[0].color, 0xFF0000);
    assert_eq!(app.purge_expired(), 0);
}

#[tokio::test]
async fn test_missing_permission_denied() {
    let recorder = Arc::new(Recorder::default());
    let app = TagbotApp::build(&config(), recorder.clone()).unwrap();

    let outcome = app
        .dispatcher()
        .dispatch(&topics_list(Permission::SendMessages.into()))
        .await
        .unwrap();
    assert!(matches!(outcome, DispatchOutcome::Denied(_)));
    assert_eq!(
        recorder.replies.lock()[0].content.as_deref(),
        Some("I'm missing permissions! (Embed Links)")
    );
}

#[test]
fn test_command_listing() {
    let registry = command_registry().unwrap();
    let lines: Vec<String> = registry.iter().map(describe).collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "/ping  permissions: Send Messages");
    assert!(lines[1].starts_with("/tag  permissions: Send Messages, Embed Links"));
    assert!(lines[1].ends_with("(autocomplete)"));
    assert!(lines[2].starts_with("/topics"));
}
