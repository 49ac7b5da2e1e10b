//! tagbot: a Discord support-tag bot.
//!
//! The crate assembles the workspace into a running bot:
//!
//! - [`tagbot_interactions`] routes typed interaction events to handlers
//!   behind a permission gate, with paginated views and one-shot listeners.
//! - [`tagbot_commands`] provides `/ping`, `/tag` and `/topics`.
//! - [`tagbot_storage`] holds guild documents in memory.
//! - [`tagbot_discord`] connects everything to the Discord gateway.
//!
//! ```no_run
//! use tagbot::{BotConfig, init_logging, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::from_env()?;
//!     init_logging(config.file().logging(), false)?;
//!     run(config).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod logging;

pub use app::{TagbotApp, command_registry, describe, run};
pub use config::{BotConfig, FileConfig, LoggingConfig, LoggingConfigBuilder};
pub use logging::init_logging;

pub use tagbot_commands as commands;
pub use tagbot_core as core;
pub use tagbot_discord as discord;
pub use tagbot_error as error;
pub use tagbot_interactions as interactions;
pub use tagbot_security as security;
pub use tagbot_storage as storage;
