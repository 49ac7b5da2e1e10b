//! Authorization layers for tagbot commands.
//!
//! A command declares an [`AccessPolicy`]: platform permission bits the bot
//! must hold, and logical role names each guild maps to concrete roles. The
//! [`PermissionGate`] evaluates the policy in two layers, role configuration
//! first and permission bits second, and returns an explicit [`Decision`].
//!
//! The first failing layer decides which denial the user sees.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod decision;
mod gate;
mod role;

pub use decision::{Decision, NO_ROLE_CONFIG_HINT, NO_ROLE_MESSAGE, format_missing_permissions};
pub use gate::{AccessPolicy, PermissionGate, RoleConfigSource};
pub use role::matches;
