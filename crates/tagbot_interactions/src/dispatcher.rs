//! Inbound event dispatch.

use crate::{CommandRegistry, InteractionContext, PageAction, PaginationController, SessionKind};
use std::sync::Arc;
use tagbot_core::{AutocompleteEvent, ComponentEvent, CustomId, EventPayload, InboundEvent, Reply};
use tagbot_error::{InteractionError, InteractionErrorKind, TagbotResult};
use tagbot_security::{Decision, PermissionGate};
use tracing::{debug, instrument};

/// Most suggestions the platform accepts in one autocomplete response.
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

/// Why an event was dropped without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IgnoreReason {
    /// No command registered under the name
    #[display("unknown command")]
    UnknownCommand,
    /// The command has no autocomplete handler
    #[display("no autocomplete handler")]
    NoAutocompleteHandler,
    /// Identifier could not be parsed
    #[display("malformed identifier")]
    MalformedIdentifier,
    /// The element belongs to another user
    #[display("foreign owner")]
    ForeignOwner,
    /// No live pagination session
    #[display("no session")]
    NoSession,
    /// No pending binding matched
    #[display("no listener")]
    NoListener,
}

/// What the dispatcher did with an event.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DispatchOutcome {
    /// The command handler ran
    #[display("handler invoked: {}", command)]
    HandlerInvoked {
        /// Command name
        command: String,
    },
    /// Authorization failed and the denial was sent
    #[display("denied: {}", _0)]
    Denied(Decision),
    /// Autocomplete suggestions were sent
    #[display("autocomplete answered with {} choices", count)]
    AutocompleteAnswered {
        /// Suggestions sent
        count: usize,
    },
    /// Permission check failed and an empty suggestion list was sent
    #[display("autocomplete denied")]
    AutocompleteDenied,
    /// A navigation button updated its message
    #[display("page {} of {} rendered", index + 1, page_count)]
    PageRendered {
        /// New page index
        index: usize,
        /// Page count
        page_count: usize,
    },
    /// A one-shot binding consumed the event
    #[display("listener consumed")]
    ListenerConsumed,
    /// Nothing happened
    #[display("ignored: {}", _0)]
    Ignored(IgnoreReason),
}

/// Routes inbound events to handlers, sessions and listeners.
///
/// Each call to [`Dispatcher::dispatch`] is independent; the dispatcher is
/// shared across event tasks behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(Arc::new(commands), gate, pagination, context);
///
/// match dispatcher.dispatch(&event).await {
///     Ok(outcome) => debug!(%outcome, "Interaction handled"),
///     Err(e) => error!(error = %e, "Interaction failed"),
/// }
/// ```
pub struct Dispatcher {
    commands: Arc<CommandRegistry>,
    gate: PermissionGate,
    pagination: PaginationController,
    context: InteractionContext,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(
        commands: Arc<CommandRegistry>,
        gate: PermissionGate,
        pagination: PaginationController,
        context: InteractionContext,
    ) -> Self {
        tracing::info!(
            commands = commands.len(),
            namespaces = ?pagination.namespaces(),
            "Creating new Dispatcher"
        );
        Self {
            commands,
            gate,
            pagination,
            context,
        }
    }

    /// Registered commands.
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Shared handler context.
    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// Dispatch one event.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler, listener callback, renderer response or
    /// role configuration lookup fails. Unknown commands, stale sessions and
    /// unmatched identifiers are not errors.
    #[instrument(
        skip(self, event),
        fields(
            kind = %event.kind(),
            identifier = event.identifier(),
            user_id = %event.user_id(),
            guild_id = ?event.guild_id()
        )
    )]
    pub async fn dispatch(&self, event: &InboundEvent) -> TagbotResult<DispatchOutcome> {
        let outcome = match &event.payload {
            EventPayload::ChatCommand(command) | EventPayload::ContextMenuCommand(command) => {
                self.dispatch_command(event, &command.name).await?
            }
            EventPayload::Autocomplete(autocomplete) => {
                self.dispatch_autocomplete(event, autocomplete).await?
            }
            EventPayload::Button(component) => self.dispatch_button(event, component).await?,
            EventPayload::ModalSubmit(_) => self.dispatch_listener(event).await?,
        };
        debug!(%outcome, "Dispatch complete");
        Ok(outcome)
    }

    async fn dispatch_command(
        &self,
        event: &InboundEvent,
        name: &str,
    ) -> TagbotResult<DispatchOutcome> {
        let Some(descriptor) = self.commands.resolve(name) else {
            debug!("Unknown command");
            return Ok(DispatchOutcome::Ignored(IgnoreReason::UnknownCommand));
        };

        let decision = self
            .gate
            .authorize(&event.actor, event.app_permissions, descriptor.policy())
            .await?;

        if let Some(message) = decision.denial_message() {
            debug!(%decision, "Command denied");
            self.context
                .responder()
                .reply(&event.token, Reply::text(message).ephemeral())
                .await?;
            return Ok(DispatchOutcome::Denied(decision));
        }

        descriptor
            .handler()
            .handle(&self.context, event)
            .await
            .map_err(|e| {
                InteractionError::new(InteractionErrorKind::HandlerFailed {
                    command: name.to_string(),
                    reason: e.to_string(),
                })
            })?;

        Ok(DispatchOutcome::HandlerInvoked {
            command: name.to_string(),
        })
    }

    async fn dispatch_autocomplete(
        &self,
        event: &InboundEvent,
        autocomplete: &AutocompleteEvent,
    ) -> TagbotResult<DispatchOutcome> {
        let name = autocomplete.command.name.as_str();
        let Some(descriptor) = self.commands.resolve(name) else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::UnknownCommand));
        };
        let Some(handler) = descriptor.autocomplete() else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::NoAutocompleteHandler));
        };

        let decision =
            PermissionGate::check_permissions(event.app_permissions, descriptor.policy().permissions);
        if !decision.is_allowed() {
            debug!(%decision, "Autocomplete denied");
            self.context
                .responder()
                .autocomplete(&event.token, Vec::new())
                .await?;
            return Ok(DispatchOutcome::AutocompleteDenied);
        }

        let mut choices = handler
            .suggest(&self.context, event, &autocomplete.focused)
            .await
            .map_err(|e| {
                InteractionError::new(InteractionErrorKind::HandlerFailed {
                    command: name.to_string(),
                    reason: e.to_string(),
                })
            })?;
        choices.truncate(MAX_AUTOCOMPLETE_CHOICES);
        let count = choices.len();

        self.context
            .responder()
            .autocomplete(&event.token, choices)
            .await?;
        Ok(DispatchOutcome::AutocompleteAnswered { count })
    }

    async fn dispatch_button(
        &self,
        event: &InboundEvent,
        component: &ComponentEvent,
    ) -> TagbotResult<DispatchOutcome> {
        let Some(namespace) = self.pagination.namespace_for(&component.custom_id) else {
            return self.dispatch_listener(event).await;
        };

        let Some(custom_id) = CustomId::parse(&component.custom_id, namespace) else {
            debug!(namespace, "Malformed pagination identifier");
            return Ok(DispatchOutcome::Ignored(IgnoreReason::MalformedIdentifier));
        };
        if custom_id.owner != event.user_id() {
            debug!(owner = %custom_id.owner, "Button belongs to another user");
            return Ok(DispatchOutcome::Ignored(IgnoreReason::ForeignOwner));
        }
        let Ok(action) = custom_id.action.parse::<PageAction>() else {
            debug!(action = %custom_id.action, "Unknown pagination action");
            return Ok(DispatchOutcome::Ignored(IgnoreReason::MalformedIdentifier));
        };

        let Some(view) = self
            .pagination
            .handle(custom_id.owner, action, &SessionKind::new(namespace))
        else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::NoSession));
        };

        let Some(renderer) = self.pagination.renderer(namespace) else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::NoSession));
        };
        let reply = renderer.render(&self.context, &view);
        self.context
            .responder()
            .update_message(&event.token, reply)
            .await?;

        Ok(DispatchOutcome::PageRendered {
            index: view.index,
            page_count: view.page_count,
        })
    }

    async fn dispatch_listener(&self, event: &InboundEvent) -> TagbotResult<DispatchOutcome> {
        if self.context.listeners().dispatch(&self.context, event).await? {
            Ok(DispatchOutcome::ListenerConsumed)
        } else {
            Ok(DispatchOutcome::Ignored(IgnoreReason::NoListener))
        }
    }
}
