//! Wiring the engine, the commands and the transport together.

use crate::BotConfig;
use std::sync::Arc;
use std::time::Duration;
use tagbot_commands::{CommandStores, register_all};
use tagbot_discord::{SerenityResponder, TagbotBot};
use tagbot_error::TagbotResult;
use tagbot_interactions::{
    CommandDescriptor, CommandRegistry, Dispatcher, InteractionContext, OneShotRegistry,
    PaginationController, Responder, SessionStore,
};
use tagbot_security::PermissionGate;
use tagbot_storage::MemoryStore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// The assembled engine, independent of the transport.
pub struct TagbotApp {
    dispatcher: Arc<Dispatcher>,
    store: Arc<MemoryStore>,
    sessions: Arc<SessionStore>,
    listeners: Arc<OneShotRegistry>,
}

impl TagbotApp {
    /// Build the engine over `responder`, seeding the store from the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data is inconsistent or a command fails to
    /// register.
    #[instrument(skip_all)]
    pub fn build(config: &BotConfig, responder: Arc<dyn Responder>) -> TagbotResult<Self> {
        let store = Arc::new(MemoryStore::from_seed(config.file().store_seed())?);
        let sessions = Arc::new(SessionStore::new(config.file().sessions().clone()));
        let listeners = Arc::new(OneShotRegistry::new(config.file().listeners().clone()));

        let context = InteractionContext::new(responder, sessions.clone(), listeners.clone())
            .with_embed_color(*config.embed_color());

        let mut commands = CommandRegistry::new();
        let mut pagination = PaginationController::new(sessions.clone());
        register_all(&mut commands, &mut pagination, stores(&store))?;

        let dispatcher = Dispatcher::new(
            Arc::new(commands),
            PermissionGate::new(store.clone()),
            pagination,
            context,
        );
        info!(guilds = store.guild_count(), "Engine assembled");

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            store,
            sessions,
            listeners,
        })
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Drop expired sessions and listeners; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.sessions.purge_expired() + self.listeners.purge_expired()
    }

    /// Purge expired state every `period` until the runtime shuts down.
    pub fn spawn_purge(&self, period: Duration) -> JoinHandle<()> {
        let sessions = self.sessions.clone();
        let listeners = self.listeners.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let purged = sessions.purge_expired() + listeners.purge_expired();
                if purged > 0 {
                    debug!(purged, "Purged expired interaction state");
                }
            }
        })
    }
}

fn stores(store: &Arc<MemoryStore>) -> CommandStores {
    CommandStores {
        tags: store.clone(),
        settings: store.clone(),
        roles: store.clone(),
    }
}

/// Every command the bot registers, without a transport.
///
/// # Errors
///
/// Returns an error if a command fails to register.
pub fn command_registry() -> TagbotResult<CommandRegistry> {
    let store = Arc::new(MemoryStore::new());
    let mut commands = CommandRegistry::new();
    let mut pagination = PaginationController::new(Arc::new(SessionStore::default()));
    register_all(&mut commands, &mut pagination, stores(&store))?;
    Ok(commands)
}

/// One line describing a command and what it requires.
pub fn describe(descriptor: &CommandDescriptor) -> String {
    let policy = descriptor.policy();
    let permissions = policy
        .permissions
        .iter()
        .map(|permission| permission.to_string())
        .collect::<Vec<_>>();
    let roles = policy
        .config_roles
        .iter()
        .map(|role| role.to_string())
        .collect::<Vec<_>>();

    let mut line = format!("/{}", descriptor.identifier());
    if !permissions.is_empty() {
        line.push_str(&format!("  permissions: {}", permissions.join(", ")));
    }
    if !roles.is_empty() {
        line.push_str(&format!("  roles: {}", roles.join(", ")));
    }
    if descriptor.autocomplete().is_some() {
        line.push_str("  (autocomplete)");
    }
    line
}

/// Connect to Discord and serve until interrupted.
///
/// # Errors
///
/// Returns an error if the engine cannot be built or the gateway fails.
#[instrument(skip_all, fields(scope = %config.scope()))]
pub async fn run(config: BotConfig) -> TagbotResult<()> {
    let responder = Arc::new(SerenityResponder::new(config.token()));
    let app = TagbotApp::build(&config, responder)?;
    let purge = app.spawn_purge(Duration::from_secs((*config.file().purge_interval_secs()).max(1)));

    let mut bot = TagbotBot::new(config.token(), app.dispatcher().clone(), *config.scope()).await?;

    let shard_manager = bot.shard_manager();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                shard_manager.shutdown_all().await;
            }
            Err(e) => error!(error = %e, "Failed to listen for interrupt"),
        }
    });

    let result = bot.start().await;
    purge.abort();
    result
}
