//! Document store for tagbot.
//!
//! Two collections per guild: support tags ([`TagStore`]) and settings
//! ([`GuildSettingsStore`]) holding role configuration and topics. The
//! in-memory [`MemoryStore`] implements both, plus
//! [`RoleConfigSource`](tagbot_security::RoleConfigSource) so the permission
//! gate can read role configuration from it. It can be seeded from TOML.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod seed;
mod settings;
mod tag;
mod validation;

pub use memory::MemoryStore;
pub use seed::{GuildSeed, StoreSeed};
pub use settings::{GuildSettings, GuildSettingsStore};
pub use tag::{Tag, TagStore, TagUpdate};
pub use validation::TagValidator;
