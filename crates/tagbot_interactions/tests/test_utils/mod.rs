//! Shared mocks for dispatcher tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tagbot_core::{
    Actor, AutocompleteChoice, ConfigRoleName, GuildId, InteractionToken, ModalForm, Reply, RoleId,
    UserId,
};
use tagbot_error::TagbotResult;
use tagbot_interactions::{
    CommandRegistry, Dispatcher, InteractionContext, OneShotRegistry, PaginationController,
    Responder, SessionStore,
};
use tagbot_security::{PermissionGate, RoleConfigSource};

/// A response the mock transport received.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Reply(Reply),
    Update(Reply),
    Modal(ModalForm),
    Autocomplete(Vec<AutocompleteChoice>),
}

/// Records every response instead of sending it.
#[derive(Default)]
pub struct MockResponder {
    sent: Mutex<Vec<(u64, Sent)>>,
}

impl MockResponder {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().iter().map(|(_, sent)| sent.clone()).collect()
    }

    pub fn last(&self) -> Option<Sent> {
        self.sent.lock().last().map(|(_, sent)| sent.clone())
    }

    fn push(&self, token: &InteractionToken, sent: Sent) {
        self.sent.lock().push((token.id, sent));
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn reply(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        self.push(token, Sent::Reply(reply));
        Ok(())
    }

    async fn update_message(&self, token: &InteractionToken, reply: Reply) -> TagbotResult<()> {
        self.push(token, Sent::Update(reply));
        Ok(())
    }

    async fn open_modal(&self, token: &InteractionToken, modal: ModalForm) -> TagbotResult<()> {
        self.push(token, Sent::Modal(modal));
        Ok(())
    }

    async fn autocomplete(
        &self,
        token: &InteractionToken,
        choices: Vec<AutocompleteChoice>,
    ) -> TagbotResult<()> {
        self.push(token, Sent::Autocomplete(choices));
        Ok(())
    }
}

/// Static role configuration.
#[derive(Default)]
pub struct MockRoleConfig {
    roles: HashMap<(GuildId, String), Vec<RoleId>>,
}

impl MockRoleConfig {
    pub fn with(mut self, guild: u64, name: &str, roles: &[u64]) -> Self {
        self.roles.insert(
            (GuildId::new(guild), name.to_string()),
            roles.iter().copied().map(RoleId::new).collect(),
        );
        self
    }
}

#[async_trait]
impl RoleConfigSource for MockRoleConfig {
    async fn configured_roles(
        &self,
        guild_id: GuildId,
        name: &ConfigRoleName,
    ) -> TagbotResult<Option<Vec<RoleId>>> {
        Ok(self.roles.get(&(guild_id, name.as_str().to_string())).cloned())
    }
}

/// Everything a dispatcher test needs to poke at.
pub struct Harness {
    pub dispatcher: Dispatcher,
    pub responder: Arc<MockResponder>,
    pub sessions: Arc<SessionStore>,
    pub listeners: Arc<OneShotRegistry>,
}

impl Harness {
    pub fn new(
        commands: CommandRegistry,
        roles: MockRoleConfig,
        configure: impl FnOnce(&mut PaginationController),
    ) -> Self {
        let responder = Arc::new(MockResponder::default());
        let sessions = Arc::new(SessionStore::default());
        let listeners = Arc::new(OneShotRegistry::default());
        let context = InteractionContext::new(responder.clone(), sessions.clone(), listeners.clone());

        let mut pagination = PaginationController::new(sessions.clone());
        configure(&mut pagination);

        let dispatcher = Dispatcher::new(
            Arc::new(commands),
            PermissionGate::new(Arc::new(roles)),
            pagination,
            context,
        );

        Self {
            dispatcher,
            responder,
            sessions,
            listeners,
        }
    }
}

pub fn member(user: u64, roles: &[u64]) -> Actor {
    Actor::new(UserId::new(user), Some(GuildId::new(1)))
        .with_roles(roles.iter().copied().map(RoleId::new))
}

pub fn token() -> InteractionToken {
    InteractionToken::new(1, "token")
}
