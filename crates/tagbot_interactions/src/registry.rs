//! Command registry.

use crate::CommandDescriptor;
use std::collections::HashMap;

/// Identifier to descriptor map, built at startup and read-only afterwards.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(ping_descriptor()?).register(tag_descriptor(stores)?);
///
/// let descriptor = registry.resolve("ping").expect("registered");
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        tracing::debug!("Creating new CommandRegistry");
        Self::default()
    }

    /// Register a descriptor.
    ///
    /// A later registration under the same identifier replaces the earlier one
    /// and logs a warning.
    #[tracing::instrument(skip(self, descriptor), fields(command = descriptor.identifier()))]
    pub fn register(&mut self, descriptor: CommandDescriptor) -> &mut Self {
        let identifier = descriptor.identifier().to_string();

        if self.commands.contains_key(&identifier) {
            tracing::warn!(command = %identifier, "Command already registered, overwriting previous registration");
        } else {
            tracing::info!(
                command = %identifier,
                permissions = %descriptor.policy().permissions,
                config_roles = descriptor.policy().config_roles.len(),
                "Registering command"
            );
        }

        self.commands.insert(identifier, descriptor);
        self
    }

    /// Look up a descriptor by command name.
    pub fn resolve(&self, identifier: &str) -> Option<&CommandDescriptor> {
        self.commands.get(identifier)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered command names, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }

    /// Descriptors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        let mut descriptors: Vec<&CommandDescriptor> = self.commands.values().collect();
        descriptors.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        descriptors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandHandler, InteractionContext};
    use async_trait::async_trait;
    use tagbot_core::{CommandDefinition, InboundEvent, Permission};
    use tagbot_error::TagbotResult;

    struct Noop;

    #[async_trait]
    impl CommandHandler for Noop {
        async fn handle(&self, _ctx: &InteractionContext, _event: &InboundEvent) -> TagbotResult<()> {
            Ok(())
        }
    }

    fn descriptor(name: &str) -> CommandDescriptor {
        CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input(name, "test"))
            .handler(Noop)
            .build()
            .unwrap()
    }

    #[test]
    fn test_registry_creation() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = CommandRegistry::new();
        registry.register(descriptor("ping")).register(descriptor("tag"));

        assert_eq!(registry.len(), 2);
        assert!(registry.resolve("ping").is_some());
        assert!(registry.resolve("pong").is_none());
        assert_eq!(registry.identifiers(), vec!["ping", "tag"]);
    }

    #[test]
    fn test_later_registration_overwrites() {
        let mut registry = CommandRegistry::new();
        registry.register(descriptor("ping"));

        let replacement = CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input("ping", "replacement"))
            .handler(Noop)
            .require_permission(Permission::SendMessages)
            .build()
            .unwrap();
        registry.register(replacement);

        assert_eq!(registry.len(), 1);
        let resolved = registry.resolve("ping").unwrap();
        assert_eq!(resolved.definition().description, "replacement");
        assert!(resolved.policy().permissions.contains(Permission::SendMessages));
    }

    #[test]
    fn test_builder_requires_handler() {
        let result = CommandDescriptor::builder()
            .definition(CommandDefinition::chat_input("ping", "test"))
            .build();
        assert!(result.is_err());
    }
}
