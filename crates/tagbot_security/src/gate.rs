//! Layered command authorization.

use crate::{Decision, matches};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tagbot_core::{Actor, ConfigRoleName, GuildId, Permission, PermissionSet, RoleId};
use tagbot_error::TagbotResult;
use tracing::{debug, instrument};

/// Read access to per-guild role configuration.
///
/// Implemented by the document store. `Ok(None)` means the guild never
/// configured `name`; an `Err` is a store failure and aborts the dispatch.
#[async_trait]
pub trait RoleConfigSource: Send + Sync {
    /// Roles the guild maps to the logical permission `name`.
    async fn configured_roles(
        &self,
        guild_id: GuildId,
        name: &ConfigRoleName,
    ) -> TagbotResult<Option<Vec<RoleId>>>;
}

/// Authorization requirements a command declares at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Platform permissions the bot must hold for the interaction
    #[serde(default)]
    pub permissions: PermissionSet,
    /// Logical role names; the actor must hold a role configured for one of them
    #[serde(default)]
    pub config_roles: Vec<ConfigRoleName>,
}

impl AccessPolicy {
    /// Policy with no requirements.
    pub fn open() -> Self {
        Self::default()
    }

    /// Require a platform permission.
    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    /// Require a configured role.
    pub fn require_config_role(mut self, name: impl Into<ConfigRoleName>) -> Self {
        self.config_roles.push(name.into());
        self
    }

    /// True when the policy imposes nothing.
    pub fn is_open(&self) -> bool {
        self.permissions.is_empty() && self.config_roles.is_empty()
    }
}

/// Evaluates [`AccessPolicy`] requirements for an actor.
///
/// # Example
///
/// ```rust,ignore
/// let gate = PermissionGate::new(store.clone());
/// match gate.authorize(&event.actor, event.app_permissions, &descriptor.policy).await? {
///     Decision::Allowed => handler.handle(ctx, &event, command).await?,
///     denied => responder.reply(&event.token, Reply::text(denied.denial_message()?)).await?,
/// }
/// ```
#[derive(Clone)]
pub struct PermissionGate {
    roles: Arc<dyn RoleConfigSource>,
}

impl PermissionGate {
    /// Create a gate backed by a role configuration source.
    pub fn new(roles: Arc<dyn RoleConfigSource>) -> Self {
        Self { roles }
    }

    /// Run both layers: configured roles, then permission bits.
    ///
    /// Role configuration is checked first so an actor who fails both sees the
    /// role denial.
    ///
    /// # Errors
    ///
    /// Returns the role configuration source's error if the lookup fails.
    #[instrument(
        skip(self, actor, policy),
        fields(
            user_id = %actor.user_id,
            guild_id = ?actor.guild_id,
            config_roles = policy.config_roles.len(),
            required = %policy.permissions
        )
    )]
    pub async fn authorize(
        &self,
        actor: &Actor,
        granted: PermissionSet,
        policy: &AccessPolicy,
    ) -> TagbotResult<Decision> {
        if !policy.config_roles.is_empty() {
            let decision = self.check_config_roles(actor, &policy.config_roles).await?;
            if !decision.is_allowed() {
                debug!(%decision, "Role configuration check failed");
                return Ok(decision);
            }
        }

        let decision = Self::check_permissions(granted, policy.permissions);
        debug!(%decision, "Authorization complete");
        Ok(decision)
    }

    /// Permission-bit layer on its own.
    ///
    /// Used directly for autocomplete requests, which skip the role layer.
    pub fn check_permissions(granted: PermissionSet, required: PermissionSet) -> Decision {
        if required.is_empty() || granted.covers(required) {
            return Decision::Allowed;
        }
        Decision::DeniedNoPermission {
            missing: granted.missing(required),
        }
    }

    /// Role-configuration layer.
    ///
    /// Roles configured under every requested name are pooled; a name the
    /// guild configured with an empty list counts as unconfigured. Events
    /// outside a guild have no configuration.
    async fn check_config_roles(
        &self,
        actor: &Actor,
        names: &[ConfigRoleName],
    ) -> TagbotResult<Decision> {
        let Some(guild_id) = actor.guild_id else {
            debug!("No guild on event, treating roles as unconfigured");
            return Ok(Decision::DeniedNoRoleNoConfig);
        };

        let mut configured: Vec<RoleId> = Vec::new();
        for name in names {
            if let Some(roles) = self.roles.configured_roles(guild_id, name).await? {
                debug!(name = %name, count = roles.len(), "Resolved configured roles");
                configured.extend(roles);
            }
        }

        if configured.is_empty() {
            return Ok(Decision::DeniedNoRoleNoConfig);
        }

        if matches(&actor.roles, &configured) {
            Ok(Decision::Allowed)
        } else {
            Ok(Decision::DeniedNoRoleWithConfig)
        }
    }
}
