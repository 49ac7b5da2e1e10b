//! In-memory backend.

use crate::{GuildSeed, GuildSettings, GuildSettingsStore, StoreSeed, Tag, TagStore, TagUpdate};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tagbot_core::{ConfigRoleName, GuildId, RoleId};
use tagbot_error::{StorageError, StorageErrorKind, TagbotResult};
use tagbot_security::RoleConfigSource;
use tracing::{debug, info, instrument};

#[derive(Debug, Default)]
struct GuildDocument {
    tags: BTreeMap<String, Tag>,
    settings: GuildSettings,
}

/// Process-local store. Contents are lost on restart.
///
/// # Example
///
/// ```
/// use tagbot_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// assert_eq!(store.guild_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    guilds: RwLock<HashMap<GuildId, GuildDocument>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from a seed.
    ///
    /// # Errors
    ///
    /// Fails if the seed lists the same tag name twice in one guild.
    pub fn from_seed(seed: StoreSeed) -> TagbotResult<Self> {
        let store = Self::new();
        {
            let mut guilds = store.guilds.write();
            for GuildSeed {
                id,
                roles,
                topics,
                tags,
            } in seed.guilds
            {
                let document = guilds.entry(id).or_default();
                document.settings.roles.extend(roles);
                document.settings.topics.extend(topics);
                for tag in tags {
                    if document.tags.contains_key(&tag.name) {
                        return Err(StorageError::new(StorageErrorKind::InvalidRecord(format!(
                            "duplicate tag '{}' in guild {}",
                            tag.name, id
                        )))
                        .into());
                    }
                    document.tags.insert(tag.name.clone(), tag);
                }
            }
            info!(guilds = guilds.len(), "Seeded memory store");
        }
        Ok(store)
    }

    /// Number of guilds with any stored data.
    pub fn guild_count(&self) -> usize {
        self.guilds.read().len()
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn get(&self, guild_id: GuildId, name: &str) -> TagbotResult<Option<Tag>> {
        Ok(self
            .guilds
            .read()
            .get(&guild_id)
            .and_then(|document| document.tags.get(name))
            .cloned())
    }

    #[instrument(skip(self, tag), fields(guild_id = %guild_id, name = %tag.name))]
    async fn create(&self, guild_id: GuildId, tag: Tag) -> TagbotResult<()> {
        let mut guilds = self.guilds.write();
        let document = guilds.entry(guild_id).or_default();
        if document.tags.contains_key(&tag.name) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists(tag.name)).into());
        }
        debug!("Creating tag");
        document.tags.insert(tag.name.clone(), tag);
        Ok(())
    }

    #[instrument(skip(self, update), fields(guild_id = %guild_id, edited_by = %update.edited_by))]
    async fn update(&self, guild_id: GuildId, name: &str, update: TagUpdate) -> TagbotResult<Tag> {
        let mut guilds = self.guilds.write();
        let Some(tag) = guilds
            .get_mut(&guild_id)
            .and_then(|document| document.tags.get_mut(name))
        else {
            return Err(StorageError::new(StorageErrorKind::NotFound(name.to_string())).into());
        };
        debug!("Updating tag");
        tag.apply(update);
        Ok(tag.clone())
    }

    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn delete(&self, guild_id: GuildId, name: &str) -> TagbotResult<bool> {
        let removed = self
            .guilds
            .write()
            .get_mut(&guild_id)
            .and_then(|document| document.tags.remove(name))
            .is_some();
        debug!(removed, "Deleted tag");
        Ok(removed)
    }

    async fn list(&self, guild_id: GuildId) -> TagbotResult<Vec<Tag>> {
        Ok(self
            .guilds
            .read()
            .get(&guild_id)
            .map(|document| document.tags.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl GuildSettingsStore for MemoryStore {
    async fn roles(&self, guild_id: GuildId, name: &ConfigRoleName) -> TagbotResult<Option<Vec<RoleId>>> {
        Ok(self
            .guilds
            .read()
            .get(&guild_id)
            .and_then(|document| document.settings.roles.get(name))
            .cloned())
    }

    #[instrument(skip(self, roles), fields(guild_id = %guild_id, name = %name, count = roles.len()))]
    async fn set_roles(&self, guild_id: GuildId, name: ConfigRoleName, roles: Vec<RoleId>) -> TagbotResult<()> {
        debug!("Configuring roles");
        self.guilds
            .write()
            .entry(guild_id)
            .or_default()
            .settings
            .roles
            .insert(name, roles);
        Ok(())
    }

    async fn topics(&self, guild_id: GuildId) -> TagbotResult<Vec<String>> {
        Ok(self
            .guilds
            .read()
            .get(&guild_id)
            .map(|document| document.settings.topics.clone())
            .unwrap_or_default())
    }

    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn add_topic(&self, guild_id: GuildId, topic: String) -> TagbotResult<bool> {
        let mut guilds = self.guilds.write();
        let topics = &mut guilds.entry(guild_id).or_default().settings.topics;
        if topics.contains(&topic) {
            return Ok(false);
        }
        topics.push(topic);
        Ok(true)
    }
}

#[async_trait]
impl RoleConfigSource for MemoryStore {
    async fn configured_roles(
        &self,
        guild_id: GuildId,
        name: &ConfigRoleName,
    ) -> TagbotResult<Option<Vec<RoleId>>> {
        self.roles(guild_id, name).await
    }
}
