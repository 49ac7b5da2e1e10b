//! Bot configuration.
//!
//! Secrets and deployment switches come from the environment (a `.env` file
//! is loaded first when present); tuning and seed data come from an optional
//! TOML file.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `DISCORD_TOKEN` | Bot token, required |
//! | `GUILD_ONLY` | `1` publishes commands to a single guild |
//! | `GUILD_ONLY_COMMANDS_ID` | That guild's id |
//! | `EMBED_COLOR` | Embed accent colour in hex, default `0x323338` |

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tagbot_core::GuildId;
use tagbot_discord::CommandScope;
use tagbot_error::{ConfigError, TagbotResult};
use tagbot_interactions::{DEFAULT_EMBED_COLOR, ListenerConfig, SessionStoreConfig};
use tagbot_storage::{GuildSeed, StoreSeed};
use tracing::{debug, info, instrument};

/// Log output settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    #[builder(default = "default_level()", setter(into))]
    level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    #[builder(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Start building a logging configuration.
    pub fn builder() -> LoggingConfigBuilder {
        LoggingConfigBuilder::default()
    }
}

impl LoggingConfigBuilder {
    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the builder is incomplete.
    pub fn build(self) -> TagbotResult<LoggingConfig> {
        let config = self
            .build_internal()
            .map_err(|e| ConfigError::new(format!("Invalid logging config: {}", e)))?;
        Ok(config)
    }
}

/// Contents of the optional TOML configuration file.
///
/// # Example
///
/// ```toml
/// purge_interval_secs = 60
///
/// [sessions]
/// ttl_secs = 900
/// max_sessions = 10000
///
/// [listeners]
/// ttl_secs = 900
///
/// [logging]
/// level = "tagbot=debug,info"
/// json = true
///
/// [[guilds]]
/// id = 123456789012345678
/// topics = ["Rust"]
///
/// [guilds.roles]
/// support = [234567890123456789]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct FileConfig {
    /// Pagination session eviction
    #[serde(default)]
    sessions: SessionStoreConfig,

    /// One-shot listener eviction
    #[serde(default)]
    listeners: ListenerConfig,

    /// Log output
    #[serde(default)]
    logging: LoggingConfig,

    /// Seconds between background purges of expired sessions and listeners
    #[serde(default = "default_purge_interval_secs")]
    purge_interval_secs: u64,

    /// Guild documents loaded into the in-memory store at startup
    #[serde(default)]
    guilds: Vec<GuildSeed>,
}

fn default_purge_interval_secs() -> u64 {
    60
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            sessions: SessionStoreConfig::default(),
            listeners: ListenerConfig::default(),
            logging: LoggingConfig::default(),
            purge_interval_secs: default_purge_interval_secs(),
            guilds: Vec::new(),
        }
    }
}

impl FileConfig {
    /// Parse configuration TOML.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TOML is malformed.
    pub fn parse(contents: &str) -> TagbotResult<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TagbotResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&contents)?;
        info!(guilds = config.guilds.len(), "Loaded configuration file");
        Ok(config)
    }

    /// Seed data for the in-memory store.
    pub fn store_seed(&self) -> StoreSeed {
        StoreSeed {
            guilds: self.guilds.clone(),
        }
    }
}

/// Everything the bot needs to start.
#[derive(Debug, Clone, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct BotConfig {
    /// Bot token
    #[getter(skip)]
    #[setters(skip)]
    token: String,

    /// Where commands are published
    scope: CommandScope,

    /// Embed accent colour
    embed_color: u32,

    /// File-based settings
    file: FileConfig,
}

impl BotConfig {
    /// Create a configuration with defaults for everything but the token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scope: CommandScope::Global,
            embed_color: DEFAULT_EMBED_COLOR,
            file: FileConfig::default(),
        }
    }

    /// The bot token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Load `.env`, then read the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is missing or malformed.
    #[instrument]
    pub fn from_env() -> TagbotResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) => debug!(error = %e, "No .env file loaded"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the environment variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `DISCORD_TOKEN` is missing, `GUILD_ONLY`
    /// is set without a valid `GUILD_ONLY_COMMANDS_ID`, or `EMBED_COLOR` is not
    /// hex.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TagbotResult<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::new("DISCORD_TOKEN not set"))?;

        let scope = if lookup("GUILD_ONLY").as_deref() == Some("1") {
            let raw = lookup("GUILD_ONLY_COMMANDS_ID").ok_or_else(|| {
                ConfigError::new("GUILD_ONLY is set but GUILD_ONLY_COMMANDS_ID is not")
            })?;
            let guild_id = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|id| *id != 0)
                .ok_or_else(|| {
                    ConfigError::new(format!("GUILD_ONLY_COMMANDS_ID is not a valid id: {}", raw))
                })?;
            CommandScope::Guild(GuildId::new(guild_id))
        } else {
            CommandScope::Global
        };

        let embed_color = match lookup("EMBED_COLOR") {
            Some(raw) => parse_color(&raw)?,
            None => DEFAULT_EMBED_COLOR,
        };

        debug!(scope = %scope, embed_color = format!("{:#08x}", embed_color), "Read environment");
        Ok(Self::new(token)
            .with_scope(scope)
            .with_embed_color(embed_color))
    }
}

/// Parse `0x323338`, `#323338` or `323338`.
fn parse_color(raw: &str) -> TagbotResult<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('#'))
        .unwrap_or(trimmed);
    let color = u32::from_str_radix(digits, 16)
        .ok()
        .filter(|color| *color <= 0xFF_FFFF)
        .ok_or_else(|| ConfigError::new(format!("EMBED_COLOR is not a hex colour: {}", raw)))?;
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_prefixes() {
        assert_eq!(parse_color("0x323338").unwrap(), 0x323338);
        assert_eq!(parse_color("#FF0000").unwrap(), 0xFF0000);
        assert_eq!(parse_color(" 00ff00 ").unwrap(), 0x00FF00);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("blue").is_err());
        assert!(parse_color("0x1000000").is_err());
    }

    #[test]
    fn test_logging_builder_defaults() {
        let config = LoggingConfig::builder().json(true).build().unwrap();
        assert_eq!(config.level(), "info");
        assert!(*config.json());
    }
}
