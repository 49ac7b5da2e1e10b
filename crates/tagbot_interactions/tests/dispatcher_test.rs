//! Command and autocomplete dispatch through the permission gate.

mod test_utils;

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tagbot_core::{
    AutocompleteChoice, AutocompleteEvent, CommandDefinition, CommandEvent, FocusedOption,
    InboundEvent, Permission, PermissionSet, Reply,
};
use tagbot_error::{ConfigError, TagbotErrorKind, TagbotResult};
use tagbot_interactions::{
    AutocompleteHandler, CommandDescriptor, CommandHandler, CommandRegistry, DispatchOutcome,
    IgnoreReason, InteractionContext, MAX_AUTOCOMPLETE_CHOICES,
};
use tagbot_security::Decision;
use test_utils::{Harness, MockRoleConfig, Sent, member, token};

/// Counts invocations and replies "Pong!".
#[derive(Clone, Default)]
struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CommandHandler for CountingHandler {
    async fn handle(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.responder().reply(&event.token, Reply::text("Pong!")).await
    }
}

struct FailingHandler;

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn handle(&self, _ctx: &InteractionContext, _event: &InboundEvent) -> TagbotResult<()> {
        Err(ConfigError::new("store offline"))?
    }
}

/// Suggests `count` numbered names.
struct NumberedSuggestions {
    count: usize,
}

#[async_trait]
impl AutocompleteHandler for NumberedSuggestions {
    async fn suggest(
        &self,
        _ctx: &InteractionContext,
        _event: &InboundEvent,
        focused: &FocusedOption,
    ) -> TagbotResult<Vec<AutocompleteChoice>> {
        Ok((0..self.count)
            .map(|i| AutocompleteChoice::new(format!("{}{}", focused.value, i)))
            .collect())
    }
}

fn ping(handler: CountingHandler) -> CommandDescriptor {
    CommandDescriptor::builder()
        .definition(CommandDefinition::chat_input("ping", "Check the bot is alive"))
        .handler(handler)
        .require_permission(Permission::SendMessages)
        .build()
        .unwrap()
}

fn ping_event(granted: PermissionSet) -> InboundEvent {
    InboundEvent::chat_command(member(42, &[]), token(), CommandEvent::new("ping"))
        .with_app_permissions(granted)
}

#[tokio::test]
async fn test_ping_without_send_messages_is_denied() {
    let handler = CountingHandler::default();
    let mut commands = CommandRegistry::new();
    commands.register(ping(handler.clone()));
    let harness = Harness::new(commands, MockRoleConfig::default(), |_| {});

    let outcome = harness
        .dispatcher
        .dispatch(&ping_event(PermissionSet::from(Permission::ViewChannel)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Denied(Decision::DeniedNoPermission {
            missing: vec![Permission::SendMessages]
        })
    );
    assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        harness.responder.sent(),
        vec![Sent::Reply(
            Reply::text("I'm missing permissions! (Send Messages)").ephemeral()
        )]
    );
}

#[tokio::test]
async fn test_ping_with_permission_invokes_handler() {
    let handler = CountingHandler::default();
    let mut commands = CommandRegistry::new();
    commands.register(ping(handler.clone()));
    let harness = Harness::new(commands, MockRoleConfig::default(), |_| {});

    let outcome = harness
        .dispatcher
        .dispatch(&ping_event(PermissionSet::from(Permission::SendMessages)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::HandlerInvoked {
            command: "ping".to_string()
        }
    );
    assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    assert_eq!(harness.responder.sent(), vec![Sent::Reply(Reply::text("Pong!"))]);
}

#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let harness = Harness::new(CommandRegistry::new(), MockRoleConfig::default(), |_| {});

    let outcome = harness
        .dispatcher
        .dispatch(&ping_event(PermissionSet::empty()))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::UnknownCommand));
    assert!(harness.responder.sent().is_empty());
}

#[tokio::test]
async fn test_role_denial_precedes_permission_denial() {
    let handler = CountingHandler::default();
    let mut commands = CommandRegistry::new();
    commands.register(
        CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input("tag", "Manage tags"))
            .handler(handler.clone())
            .require_config_role("support")
            .require_permission(Permission::SendMessages)
            .build()
            .unwrap(),
    );
    let harness = Harness::new(commands, MockRoleConfig::default(), |_| {});

    let event = InboundEvent::chat_command(member(42, &[9]), token(), CommandEvent::new("tag"));
    let outcome = harness.dispatcher.dispatch(&event).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Denied(Decision::DeniedNoRoleNoConfig));
    assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        harness.responder.last(),
        Some(Sent::Reply(
            Reply::text(
                "Sorry but you can't use this command. Configuration of roles required. Please check with the server administrator."
            )
            .ephemeral()
        ))
    );
}

#[tokio::test]
async fn test_configured_role_without_membership_is_denied() {
    let mut commands = CommandRegistry::new();
    commands.register(
        CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input("tag", "Manage tags"))
            .handler(CountingHandler::default())
            .require_config_role("support")
            .build()
            .unwrap(),
    );
    let harness = Harness::new(
        commands,
        MockRoleConfig::default().with(1, "support", &[100]),
        |_| {},
    );

    let event = InboundEvent::chat_command(member(42, &[9]), token(), CommandEvent::new("tag"));
    let outcome = harness.dispatcher.dispatch(&event).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Denied(Decision::DeniedNoRoleWithConfig));
    assert_eq!(
        harness.responder.last(),
        Some(Sent::Reply(
            Reply::text("Sorry but you can't use this command.").ephemeral()
        ))
    );
}

#[tokio::test]
async fn test_handler_failure_is_returned() {
    let mut commands = CommandRegistry::new();
    commands.register(
        CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input("broken", "Always fails"))
            .handler(FailingHandler)
            .build()
            .unwrap(),
    );
    let harness = Harness::new(commands, MockRoleConfig::default(), |_| {});

    let event = InboundEvent::chat_command(member(42, &[]), token(), CommandEvent::new("broken"));
    let err = harness.dispatcher.dispatch(&event).await.unwrap_err();

    assert!(matches!(err.kind(), TagbotErrorKind::Interaction(_)));
    assert!(err.to_string().contains("broken"));
}

fn autocomplete_event(granted: PermissionSet) -> InboundEvent {
    InboundEvent::autocomplete(
        member(42, &[]),
        token(),
        AutocompleteEvent {
            command: CommandEvent::new("tag").with_subcommand("show"),
            focused: FocusedOption {
                name: "name".to_string(),
                value: "faq".to_string(),
            },
        },
    )
    .with_app_permissions(granted)
}

fn tag_with_autocomplete(count: usize) -> CommandRegistry {
    let mut commands = CommandRegistry::new();
    commands.register(
        CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input("tag", "Manage tags"))
            .handler(CountingHandler::default())
            .autocomplete(NumberedSuggestions { count })
            .require_permission(Permission::SendMessages)
            .require_config_role("support")
            .build()
            .unwrap(),
    );
    commands
}

#[tokio::test]
async fn test_autocomplete_is_capped() {
    let harness = Harness::new(tag_with_autocomplete(40), MockRoleConfig::default(), |_| {});

    let outcome = harness
        .dispatcher
        .dispatch(&autocomplete_event(PermissionSet::from(Permission::SendMessages)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::AutocompleteAnswered {
            count: MAX_AUTOCOMPLETE_CHOICES
        }
    );
    match harness.responder.last() {
        Some(Sent::Autocomplete(choices)) => {
            assert_eq!(choices.len(), MAX_AUTOCOMPLETE_CHOICES);
            assert_eq!(choices[0].value, "faq0");
        }
        other => panic!("expected autocomplete, got {:?}", other),
    }
}

#[tokio::test]
async fn test_autocomplete_skips_role_gate() {
    // No role configuration exists, but autocomplete only checks permission bits.
    let harness = Harness::new(tag_with_autocomplete(3), MockRoleConfig::default(), |_| {});

    let outcome = harness
        .dispatcher
        .dispatch(&autocomplete_event(PermissionSet::from(Permission::SendMessages)))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::AutocompleteAnswered { count: 3 });
}

#[tokio::test]
async fn test_autocomplete_denied_answers_empty() {
    let harness = Harness::new(tag_with_autocomplete(3), MockRoleConfig::default(), |_| {});

    let outcome = harness
        .dispatcher
        .dispatch(&autocomplete_event(PermissionSet::empty()))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::AutocompleteDenied);
    assert_eq!(harness.responder.sent(), vec![Sent::Autocomplete(Vec::new())]);
}

#[tokio::test]
async fn test_autocomplete_without_handler_is_ignored() {
    let mut commands = CommandRegistry::new();
    commands.register(ping(CountingHandler::default()));
    let harness = Harness::new(commands, MockRoleConfig::default(), |_| {});

    let event = InboundEvent::autocomplete(
        member(42, &[]),
        token(),
        AutocompleteEvent {
            command: CommandEvent::new("ping"),
            focused: FocusedOption::default(),
        },
    );
    let outcome = harness.dispatcher.dispatch(&event).await.unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Ignored(IgnoreReason::NoAutocompleteHandler)
    );
    assert!(harness.responder.sent().is_empty());
}
