//! Serenity transport for the tagbot dispatch engine.
//!
//! Gateway interactions are converted into [`InboundEvent`](tagbot_core::InboundEvent)s
//! and handed to a [`Dispatcher`](tagbot_interactions::Dispatcher); responses
//! flow back through [`SerenityResponder`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod convert;
mod handler;
mod publish;
mod render;
mod responder;

pub use client::TagbotBot;
pub use convert::inbound_event;
pub use handler::TagbotHandler;
pub use publish::{CommandScope, publish_commands};
pub use render::{autocomplete_response, create_command, create_modal, response_message};
pub use responder::SerenityResponder;
