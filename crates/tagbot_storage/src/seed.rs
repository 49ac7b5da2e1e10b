//! TOML seed data for the in-memory store.

use crate::Tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tagbot_core::{ConfigRoleName, GuildId, RoleId};
use tagbot_error::{StorageError, StorageErrorKind, TagbotResult};

/// Initial contents for one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSeed {
    /// Guild snowflake
    pub id: GuildId,
    /// Logical role name to role ids
    #[serde(default)]
    pub roles: BTreeMap<ConfigRoleName, Vec<RoleId>>,
    /// Discussion topics
    #[serde(default)]
    pub topics: Vec<String>,
    /// Support tags
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Seed file contents.
///
/// # Example
///
/// ```toml
/// [[guilds]]
/// id = 123456789012345678
/// topics = ["Rust", "Async"]
///
/// [guilds.roles]
/// support = [234567890123456789]
///
/// [[guilds.tags]]
/// name = "faq"
/// title = "Frequently asked questions"
/// description = "Read the pinned messages first."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreSeed {
    /// Guild documents
    #[serde(default)]
    pub guilds: Vec<GuildSeed>,
}

impl StoreSeed {
    /// Parse seed TOML.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TOML is malformed.
    pub fn parse(contents: &str) -> TagbotResult<Self> {
        let seed: Self = toml::from_str(contents).map_err(tagbot_error::ConfigError::from)?;
        Ok(seed)
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TagbotResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading store seed from file");

        let contents = fs::read_to_string(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        let seed = Self::parse(&contents)?;

        tracing::info!(guilds = seed.guilds.len(), "Loaded store seed");
        Ok(seed)
    }
}
