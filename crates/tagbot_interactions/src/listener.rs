//! One-shot listeners for follow-up interactions.
//!
//! When a handler opens a modal it registers a [`OneShotBinding`] for the
//! modal's id and the user it was shown to. The binding fires on the first
//! matching submission and is gone afterwards.

use crate::InteractionContext;
use derive_getters::Getters;
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use tagbot_core::{InboundEvent, UserId};
use tagbot_error::{InteractionError, InteractionErrorKind, TagbotResult};
use tracing::{debug, instrument, warn};

type Predicate = Box<dyn Fn(&InboundEvent) -> bool + Send + Sync>;
type Callback =
    Box<dyn FnOnce(InteractionContext, InboundEvent) -> BoxFuture<'static, TagbotResult<()>> + Send>;

/// A pending listener for exactly one future interaction.
pub struct OneShotBinding {
    element_id: String,
    owner: UserId,
    predicate: Predicate,
    callback: Callback,
    registered_at: Instant,
}

impl OneShotBinding {
    /// Bind `callback` to the first event with identifier `element_id`, acted
    /// by `owner`, that satisfies `predicate`.
    pub fn new<P, F, Fut>(
        element_id: impl Into<String>,
        owner: UserId,
        predicate: P,
        callback: F,
    ) -> Self
    where
        P: Fn(&InboundEvent) -> bool + Send + Sync + 'static,
        F: FnOnce(InteractionContext, InboundEvent) -> Fut + Send + 'static,
        Fut: Future<Output = TagbotResult<()>> + Send + 'static,
    {
        Self {
            element_id: element_id.into(),
            owner,
            predicate: Box::new(predicate),
            callback: Box::new(move |ctx, event| callback(ctx, event).boxed()),
            registered_at: Instant::now(),
        }
    }

    /// Bind to a modal submission.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let modal_id = owned_element_id("tag_create", actor);
    /// ctx.listeners().register(OneShotBinding::modal(&modal_id, actor, move |ctx, event| async move {
    ///     create_tag(&ctx, &event, &store).await
    /// }));
    /// ctx.responder().open_modal(&event.token, create_modal(&modal_id)).await?;
    /// ```
    pub fn modal<F, Fut>(element_id: impl Into<String>, owner: UserId, callback: F) -> Self
    where
        F: FnOnce(InteractionContext, InboundEvent) -> Fut + Send + 'static,
        Fut: Future<Output = TagbotResult<()>> + Send + 'static,
    {
        Self::new(element_id, owner, InboundEvent::is_modal_submit, callback)
    }

    /// Identifier the binding waits for.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// User allowed to trigger the binding.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    fn accepts(&self, event: &InboundEvent) -> bool {
        self.element_id == event.identifier()
            && self.owner == event.user_id()
            && (self.predicate)(event)
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.registered_at.elapsed() >= ttl
    }
}

impl std::fmt::Debug for OneShotBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneShotBinding")
            .field("element_id", &self.element_id)
            .field("owner", &self.owner)
            .field("registered_at", &self.registered_at)
            .finish_non_exhaustive()
    }
}

/// Listener retention settings.
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
pub struct ListenerConfig {
    /// Seconds a binding waits before it is discarded
    #[serde(default = "default_ttl_secs")]
    ttl_secs: u64,

    /// Pending bindings kept before the oldest is dropped
    #[serde(default = "default_max_pending")]
    max_pending: usize,
}

fn default_ttl_secs() -> u64 {
    900 // interaction token lifetime
}

fn default_max_pending() -> usize {
    10_000
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_pending: default_max_pending(),
        }
    }
}

/// Pending one-shot bindings.
///
/// A matching binding is removed under the lock before its callback runs, so
/// two racing events can never both fire it.
#[derive(Debug)]
pub struct OneShotRegistry {
    config: ListenerConfig,
    pending: Mutex<Vec<OneShotBinding>>,
}

impl OneShotRegistry {
    /// Create an empty registry.
    pub fn new(config: ListenerConfig) -> Self {
        debug!(
            ttl_secs = config.ttl_secs,
            max_pending = config.max_pending,
            "Creating new OneShotRegistry"
        );
        Self {
            config,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }

    /// Add a binding.
    ///
    /// Replaces a pending binding with the same element id and owner. At
    /// capacity the oldest binding is dropped.
    #[instrument(skip(self, binding), fields(element_id = %binding.element_id, owner = %binding.owner))]
    pub fn register(&self, binding: OneShotBinding) {
        let ttl = self.ttl();
        let mut pending = self.pending.lock();

        pending.retain(|existing| !existing.is_expired(ttl));

        let before = pending.len();
        pending.retain(|existing| {
            existing.element_id != binding.element_id || existing.owner != binding.owner
        });
        if pending.len() < before {
            debug!("Replaced pending binding");
        }

        if pending.len() >= self.config.max_pending && !pending.is_empty() {
            let dropped = pending.remove(0);
            warn!(
                dropped = %dropped.element_id,
                "Listener registry at capacity, dropping oldest binding"
            );
        }

        pending.push(binding);
        debug!(pending = pending.len(), "Registered one-shot binding");
    }

    /// Withdraw the pending binding for `element_id` owned by `owner`.
    ///
    /// Returns whether one was pending.
    pub fn cancel(&self, element_id: &str, owner: UserId) -> bool {
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|existing| existing.element_id != element_id || existing.owner != owner);
        let cancelled = pending.len() < before;
        if cancelled {
            debug!(element_id, owner = %owner, "Cancelled pending binding");
        }
        cancelled
    }

    /// Offer an event to the pending bindings.
    ///
    /// Returns `true` when a binding consumed the event.
    ///
    /// # Errors
    ///
    /// Returns a listener failure if the consumed binding's callback fails.
    #[instrument(skip(self, ctx, event), fields(identifier = event.identifier(), user_id = %event.user_id()))]
    pub async fn dispatch(&self, ctx: &InteractionContext, event: &InboundEvent) -> TagbotResult<bool> {
        let binding = {
            let ttl = self.ttl();
            let mut pending = self.pending.lock();
            pending.retain(|existing| !existing.is_expired(ttl));
            let position = pending.iter().position(|binding| binding.accepts(event));
            position.map(|position| pending.remove(position))
        };

        let Some(binding) = binding else {
            debug!("No matching binding");
            return Ok(false);
        };

        debug!("Binding matched, running callback");
        let element_id = binding.element_id;
        (binding.callback)(ctx.clone(), event.clone())
            .await
            .map_err(|e| {
                InteractionError::new(InteractionErrorKind::ListenerFailed {
                    element_id,
                    reason: e.to_string(),
                })
            })?;
        Ok(true)
    }

    /// Drop every expired binding and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let ttl = self.ttl();
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|binding| !binding.is_expired(ttl));
        let removed = before - pending.len();
        if removed > 0 {
            tracing::info!(removed, remaining = pending.len(), "Purged expired bindings");
        }
        removed
    }

    /// Number of pending bindings.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl Default for OneShotRegistry {
    fn default() -> Self {
        Self::new(ListenerConfig::default())
    }
}
