//! Interaction dispatch engine.
//!
//! Every inbound interaction goes through a [`Dispatcher`]:
//!
//! - commands and context-menu commands are resolved in the [`CommandRegistry`],
//!   authorized by the [`PermissionGate`](tagbot_security::PermissionGate) and
//!   handed to their [`CommandHandler`]
//! - autocomplete requests go to the command's [`AutocompleteHandler`]
//! - buttons under a registered pagination namespace drive the
//!   [`PaginationController`]; any other button, and every modal submission,
//!   is offered to the [`OneShotRegistry`]
//!
//! Long-lived UI state lives in the [`SessionStore`], keyed by owner and
//! session kind. Outbound traffic goes through the [`Responder`] trait so the
//! engine never touches the transport directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod descriptor;
mod dispatcher;
mod handler;
mod listener;
mod pagination;
mod registry;
mod responder;
mod session;

pub use context::{DEFAULT_EMBED_COLOR, InteractionContext};
pub use descriptor::{CommandDescriptor, CommandDescriptorBuilder};
pub use dispatcher::{DispatchOutcome, Dispatcher, IgnoreReason, MAX_AUTOCOMPLETE_CHOICES};
pub use handler::{AutocompleteHandler, CommandHandler};
pub use listener::{ListenerConfig, ListenerConfigBuilder, OneShotBinding, OneShotRegistry};
pub use pagination::{
    PageAction, PageRenderer, PageView, PaginationController, navigation_row, paginate,
};
pub use registry::CommandRegistry;
pub use responder::Responder;
pub use session::{
    PaginationSession, SessionKey, SessionKind, SessionStore, SessionStoreConfig,
    SessionStoreConfigBuilder,
};
