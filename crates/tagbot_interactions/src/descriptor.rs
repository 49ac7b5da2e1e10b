//! Command descriptors.

use crate::{AutocompleteHandler, CommandHandler};
use derive_getters::Getters;
use std::sync::Arc;
use tagbot_core::{CommandDefinition, ConfigRoleName, Permission};
use tagbot_error::{ConfigError, TagbotResult};
use tagbot_security::AccessPolicy;

/// A registered command: its platform definition, handlers and access policy.
///
/// # Example
///
/// ```rust,ignore
/// let descriptor = CommandDescriptor::builder()
///     .definition(CommandDefinition::chat_input("ping", "Check the bot is alive"))
///     .handler(PingCommand)
///     .require_permission(Permission::SendMessages)
///     .build()?;
/// registry.register(descriptor);
/// ```
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct CommandDescriptor {
    /// Definition published to the platform
    #[builder(setter(into))]
    definition: CommandDefinition,
    /// Command handler
    #[builder(setter(custom))]
    handler: Arc<dyn CommandHandler>,
    /// Optional autocomplete handler
    #[builder(setter(custom), default)]
    autocomplete: Option<Arc<dyn AutocompleteHandler>>,
    /// Authorization requirements
    #[builder(setter(into), default)]
    policy: AccessPolicy,
}

impl CommandDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> CommandDescriptorBuilder {
        CommandDescriptorBuilder::default()
    }

    /// Registry key: the command name.
    pub fn identifier(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("identifier", &self.identifier())
            .field("autocomplete", &self.autocomplete.is_some())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CommandDescriptorBuilder {
    /// Set the command handler.
    pub fn handler<H: CommandHandler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Set the autocomplete handler.
    pub fn autocomplete<A: AutocompleteHandler + 'static>(mut self, handler: A) -> Self {
        self.autocomplete = Some(Some(Arc::new(handler)));
        self
    }

    /// Add a platform permission to the policy.
    pub fn require_permission(mut self, permission: Permission) -> Self {
        let policy = self.policy.take().unwrap_or_default();
        self.policy = Some(policy.require_permission(permission));
        self
    }

    /// Add a configured role name to the policy.
    pub fn require_config_role(mut self, name: impl Into<ConfigRoleName>) -> Self {
        let policy = self.policy.take().unwrap_or_default();
        self.policy = Some(policy.require_config_role(name));
        self
    }

    /// Build the descriptor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the definition or handler is missing.
    pub fn build(self) -> TagbotResult<CommandDescriptor> {
        let descriptor = self
            .build_internal()
            .map_err(|e| ConfigError::new(format!("Invalid command descriptor: {}", e)))?;
        Ok(descriptor)
    }
}
