//! Navigation buttons driving pagination sessions.

mod test_utils;

use tagbot_core::{InboundEvent, Reply, UserId};
use tagbot_interactions::{
    CommandRegistry, DispatchOutcome, IgnoreReason, InteractionContext, PageRenderer, PageView,
    SessionKey, navigation_row,
};
use test_utils::{Harness, MockRoleConfig, Sent, member, token};

const LIST: &str = "list_subcommand_button";
const TOPICS: &str = "add_topic_subcommand_button";

/// Renders rows as plain text plus the navigation row.
struct PlainRenderer;

impl PageRenderer for PlainRenderer {
    fn render(&self, _ctx: &InteractionContext, view: &PageView) -> Reply {
        Reply::text(view.rows.join(",")).with_row(navigation_row(view))
    }
}

fn harness() -> Harness {
    Harness::new(CommandRegistry::new(), MockRoleConfig::default(), |pagination| {
        pagination.register(LIST, PlainRenderer);
        pagination.register(TOPICS, PlainRenderer);
    })
}

fn pages() -> Vec<Vec<String>> {
    vec![
        vec!["a".into(), "b".into(), "c".into()],
        vec!["d".into(), "e".into(), "f".into()],
    ]
}

fn click(user: u64, custom_id: &str) -> InboundEvent {
    InboundEvent::button(member(user, &[]), token(), custom_id)
}

#[tokio::test]
async fn test_next_wraps_around() {
    let harness = harness();
    harness
        .sessions
        .open(SessionKey::new(UserId::new(42), LIST), pages())
        .unwrap();

    let first = harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_next_42"))
        .await
        .unwrap();
    assert_eq!(first, DispatchOutcome::PageRendered { index: 1, page_count: 2 });

    let second = harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_next_42"))
        .await
        .unwrap();
    assert_eq!(second, DispatchOutcome::PageRendered { index: 0, page_count: 2 });

    match harness.responder.last() {
        Some(Sent::Update(reply)) => assert_eq!(reply.content.as_deref(), Some("a,b,c")),
        other => panic!("expected message update, got {:?}", other),
    }
}

#[tokio::test]
async fn test_previous_wraps_to_last_page() {
    let harness = harness();
    harness
        .sessions
        .open(SessionKey::new(UserId::new(42), LIST), pages())
        .unwrap();

    let outcome = harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_previous_42"))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::PageRendered { index: 1, page_count: 2 });

    match harness.responder.last() {
        Some(Sent::Update(reply)) => {
            let buttons = &reply.components[0].buttons;
            assert!(!buttons[0].disabled);
            assert!(buttons[2].disabled);
        }
        other => panic!("expected message update, got {:?}", other),
    }
}

#[tokio::test]
async fn test_home_returns_to_first_page() {
    let harness = harness();
    let key = SessionKey::new(UserId::new(42), LIST);
    harness.sessions.open(key.clone(), pages()).unwrap();

    harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_next_42"))
        .await
        .unwrap();
    let outcome = harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_home_42"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::PageRendered { index: 0, page_count: 2 });
    assert_eq!(harness.sessions.view(&key).unwrap().index, 0);
}

#[tokio::test]
async fn test_missing_session_is_a_no_op() {
    let harness = harness();

    let outcome = harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_next_42"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NoSession));
    assert!(harness.responder.sent().is_empty());
}

#[tokio::test]
async fn test_foreign_button_is_not_actionable() {
    let harness = harness();
    let owner_key = SessionKey::new(UserId::new(42), LIST);
    harness.sessions.open(owner_key.clone(), pages()).unwrap();
    harness
        .sessions
        .open(SessionKey::new(UserId::new(7), LIST), pages())
        .unwrap();

    // User 7 clicks a button rendered for user 42.
    let outcome = harness
        .dispatcher
        .dispatch(&click(7, "list_subcommand_button_next_42"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::ForeignOwner));
    assert_eq!(harness.sessions.view(&owner_key).unwrap().index, 0);
}

#[tokio::test]
async fn test_sessions_are_isolated_between_owners_and_kinds() {
    let harness = harness();
    let alice_list = SessionKey::new(UserId::new(1), LIST);
    let alice_topics = SessionKey::new(UserId::new(1), TOPICS);
    let bob_list = SessionKey::new(UserId::new(2), LIST);
    for key in [&alice_list, &alice_topics, &bob_list] {
        harness.sessions.open(key.clone(), pages()).unwrap();
    }

    harness
        .dispatcher
        .dispatch(&click(1, "list_subcommand_button_next_1"))
        .await
        .unwrap();

    assert_eq!(harness.sessions.view(&alice_list).unwrap().index, 1);
    assert_eq!(harness.sessions.view(&alice_topics).unwrap().index, 0);
    assert_eq!(harness.sessions.view(&bob_list).unwrap().index, 0);
}

#[tokio::test]
async fn test_unknown_action_is_ignored() {
    let harness = harness();
    harness
        .sessions
        .open(SessionKey::new(UserId::new(42), LIST), pages())
        .unwrap();

    let outcome = harness
        .dispatcher
        .dispatch(&click(42, "list_subcommand_button_last_42"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::MalformedIdentifier));
}

#[tokio::test]
async fn test_unregistered_namespace_falls_through_to_listeners() {
    let harness = harness();

    let outcome = harness
        .dispatcher
        .dispatch(&click(42, "confirm_delete_42"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NoListener));
}
