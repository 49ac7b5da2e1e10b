//! Per-guild settings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tagbot_core::{ConfigRoleName, GuildId, RoleId};
use tagbot_error::TagbotResult;

/// Settings document for one guild.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuildSettings {
    /// Logical role name to the roles that grant it
    #[serde(default)]
    pub roles: BTreeMap<ConfigRoleName, Vec<RoleId>>,
    /// Configured discussion topics
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Settings persistence.
#[async_trait]
pub trait GuildSettingsStore: Send + Sync {
    /// Roles configured for `name`; `None` when never configured.
    async fn roles(&self, guild_id: GuildId, name: &ConfigRoleName) -> TagbotResult<Option<Vec<RoleId>>>;

    /// Configure the roles for `name`, replacing any previous list.
    async fn set_roles(&self, guild_id: GuildId, name: ConfigRoleName, roles: Vec<RoleId>) -> TagbotResult<()>;

    /// Configured topics in insertion order.
    async fn topics(&self, guild_id: GuildId) -> TagbotResult<Vec<String>>;

    /// Append a topic. Returns `false` if it was already present.
    async fn add_topic(&self, guild_id: GuildId, topic: String) -> TagbotResult<bool>;
}
