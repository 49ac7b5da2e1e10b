//! Error types for the tagbot workspace.
//!
//! # Error Hierarchy
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` to capture the location automatically
//!
//! All of them convert into [`TagbotError`] so handlers can use `?` freely.
//!
//! # Examples
//!
//! ```
//! use tagbot_error::{ConfigError, TagbotResult};
//!
//! fn load_token() -> TagbotResult<String> {
//!     Err(ConfigError::new("DISCORD_TOKEN not set"))?
//! }
//!
//! assert!(load_token().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod interaction;
mod storage;
mod transport;

pub use config::ConfigError;
pub use error::{TagbotError, TagbotErrorKind, TagbotResult};
pub use interaction::{InteractionError, InteractionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use transport::{TransportError, TransportErrorKind};
