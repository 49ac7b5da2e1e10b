//! A dispatcher wired with every command over an in-memory store.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tagbot_commands::{CommandStores, register_all};
use tagbot_core::{
    Actor, AutocompleteChoice, CommandEvent, GuildId, InboundEvent, InteractionToken, ModalEvent,
    ModalForm, Permission, PermissionSet, Reply, RoleId, UserId,
};
use tagbot_error::{TagbotResult, TransportError, TransportErrorKind};
use tagbot_interactions::{
    CommandRegistry, Dispatcher, InteractionContext, OneShotRegistry, PaginationController,
    Responder, SessionStore,
};
use tagbot_security::PermissionGate;
use tagbot_storage::{MemoryStore, StoreSeed, Tag, TagStore, TagUpdate};

pub const GUILD: GuildId = GuildId::new(1);
pub const SUPPORT: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Reply(Reply),
    Update(Reply),
    Modal(ModalForm),
    Autocomplete(Vec<AutocompleteChoice>),
}

#[derive(Default)]
pub struct MockResponder {
    sent: Mutex<Vec<Sent>>,
    reject_modals: AtomicBool,
}

impl MockResponder {
    /// Fail every later `open_modal` call.
    pub fn reject_modals(&self) {
        self.reject_modals.store(true, Ordering::SeqCst);
    }

    /// Content of every reply sent so far, in order.
    pub fn reply_contents(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|sent| match sent {
                Sent::Reply(reply) => reply.content.clone(),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<Sent> {
        self.sent.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn last_reply(&self) -> Reply {
        match self.last() {
            Some(Sent::Reply(reply)) | Some(Sent::Update(reply)) => reply,
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    pub fn last_modal(&self) -> ModalForm {
        match self.last() {
            Some(Sent::Modal(modal)) => modal,
            other => panic!("expected a modal, got {:?}", other),
        }
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn reply(&self, _token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        self.sent.lock().push(Sent::Reply(reply));
        Ok(())
    }

    async fn update_message(&self, _token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        self.sent.lock().push(Sent::Update(reply));
        Ok(())
    }

    async fn open_modal(&self, _token: &InteractionToken, modal: ModalForm) -> TagbotResult<()> {
        if self.reject_modals.load(Ordering::SeqCst) {
            return Err(TransportError::new(TransportErrorKind::ResponseFailed(
                "modal rejected".into(),
            ))
            .into());
        }
        self.sent.lock().push(Sent::Modal(modal));
        Ok(())
    }

    async fn autocomplete(
        &self,
        _token: &InteractionToken,
        choices: Vec<AutocompleteChoice>,
    ) -> TagbotResult<()> {
        self.sent.lock().push(Sent::Autocomplete(choices));
        Ok(())
    }
}

pub struct Bot {
    pub dispatcher: Dispatcher,
    pub responder: Arc<MockResponder>,
    pub store: Arc<MemoryStore>,
}

impl Bot {
    /// Bot over a store seeded from TOML.
    pub fn seeded(seed: &str) -> Self {
        Self::with_tags(seed, |store| store as Arc<dyn TagStore>)
    }

    /// Bot whose tag commands go through `wrap(store)`.
    pub fn with_tags(seed: &str, wrap: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn TagStore>) -> Self {
        let store = Arc::new(MemoryStore::from_seed(StoreSeed::parse(seed).unwrap()).unwrap());
        let responder = Arc::new(MockResponder::default());
        let sessions = Arc::new(SessionStore::default());
        let listeners = Arc::new(OneShotRegistry::default());
        let context = InteractionContext::new(responder.clone(), sessions.clone(), listeners);

        let mut commands = CommandRegistry::new();
        let mut pagination = PaginationController::new(sessions);
        register_all(
            &mut commands,
            &mut pagination,
            CommandStores {
                tags: wrap(store.clone()),
                settings: store.clone(),
                roles: store.clone(),
            },
        )
        .unwrap();

        let dispatcher = Dispatcher::new(
            Arc::new(commands),
            PermissionGate::new(store.clone()),
            pagination,
            context,
        );

        Self {
            dispatcher,
            responder,
            store,
        }
    }
}

pub fn supporter(user: u64) -> Actor {
    Actor::new(UserId::new(user), Some(GUILD)).with_roles([RoleId::new(SUPPORT)])
}

pub fn member(user: u64) -> Actor {
    Actor::new(UserId::new(user), Some(GUILD))
}

pub fn granted() -> PermissionSet {
    [Permission::SendMessages, Permission::EmbedLinks]
        .into_iter()
        .collect()
}

pub fn command(actor: Actor, command: CommandEvent) -> InboundEvent {
    InboundEvent::chat_command(actor, InteractionToken::new(1, "token"), command)
        .with_app_permissions(granted())
}

pub fn button(actor: Actor, custom_id: impl Into<String>) -> InboundEvent {
    InboundEvent::button(actor, InteractionToken::new(2, "token"), custom_id)
        .with_app_permissions(granted())
}

pub fn modal(actor: Actor, custom_id: &str, fields: &[(&str, &str)]) -> InboundEvent {
    let fields: HashMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let modal = ModalEvent {
        custom_id: custom_id.to_string(),
        fields,
    };
    InboundEvent::modal_submit(actor, InteractionToken::new(3, "token"), modal)
        .with_app_permissions(granted())
}

/// Tag store that suspends after every lookup, letting other submissions
/// run between a handler's check and its write.
pub struct YieldingTags(pub Arc<MemoryStore>);

#[async_trait]
impl TagStore for YieldingTags {
    async fn get(&self, guild_id: GuildId, name: &str) -> TagbotResult<Option<Tag>> {
        let tag = self.0.get(guild_id, name).await;
        tokio::task::yield_now().await;
        tag
    }

    async fn create(&self, guild_id: GuildId, tag: Tag) -> TagbotResult<()> {
        self.0.create(guild_id, tag).await
    }

    async fn update(&self, guild_id: GuildId, name: &str, update: TagUpdate) -> TagbotResult<Tag> {
        self.0.update(guild_id, name, update).await
    }

    async fn delete(&self, guild_id: GuildId, name: &str) -> TagbotResult<bool> {
        self.0.delete(guild_id, name).await
    }

    async fn list(&self, guild_id: GuildId) -> TagbotResult<Vec<Tag>> {
        self.0.list(guild_id).await
    }
}
