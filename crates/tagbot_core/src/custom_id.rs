//! Component identifier encoding.
//!
//! Interactive elements carry identifiers of the form
//! `<namespace>_<action>_<ownerId>` (pagination buttons) or
//! `<namespace>_<ownerId>` (modals). The trailing owner id is what keeps one
//! user's buttons from being actionable by another.

use crate::UserId;

/// A parsed `<namespace>_<action>_<ownerId>` identifier.
///
/// # Examples
///
/// ```
/// use tagbot_core::{CustomId, UserId};
///
/// let encoded = CustomId::new("list_subcommand_button", "next", UserId::new(42)).encode();
/// assert_eq!(encoded, "list_subcommand_button_next_42");
///
/// let parsed = CustomId::parse(&encoded, "list_subcommand_button").unwrap();
/// assert_eq!(parsed.action, "next");
/// assert_eq!(parsed.owner, UserId::new(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomId {
    /// Namespace prefix, without the trailing separator
    pub namespace: String,
    /// Action segment
    pub action: String,
    /// User the element belongs to
    pub owner: UserId,
}

impl CustomId {
    /// Create an identifier.
    pub fn new(namespace: impl Into<String>, action: impl Into<String>, owner: UserId) -> Self {
        Self {
            namespace: namespace.into(),
            action: action.into(),
            owner,
        }
    }

    /// Render the identifier string.
    pub fn encode(&self) -> String {
        format!("{}_{}_{}", self.namespace, self.action, self.owner)
    }

    /// True when `raw` starts with `namespace` followed by the separator.
    pub fn has_namespace(raw: &str, namespace: &str) -> bool {
        raw.strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with('_'))
    }

    /// Parse `raw` under a fixed namespace.
    ///
    /// Returns `None` when the prefix does not match, the action is empty, or
    /// the owner segment is not a snowflake.
    pub fn parse(raw: &str, namespace: &str) -> Option<Self> {
        let rest = raw.strip_prefix(namespace)?.strip_prefix('_')?;
        let (action, owner) = rest.rsplit_once('_')?;
        if action.is_empty() {
            return None;
        }
        let owner = owner.parse::<UserId>().ok()?;
        Some(Self::new(namespace, action, owner))
    }
}

/// Identifier for an element owned by one user: `<namespace>_<ownerId>`.
///
/// # Examples
///
/// ```
/// use tagbot_core::{owned_element_id, UserId};
///
/// assert_eq!(owned_element_id("tag_create", UserId::new(42)), "tag_create_42");
/// ```
pub fn owned_element_id(namespace: &str, owner: UserId) -> String {
    format!("{}_{}", namespace, owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_other_namespace() {
        assert!(CustomId::parse("add_topic_subcommand_button_next_1", "list_subcommand_button").is_none());
    }

    #[test]
    fn test_parse_rejects_namespace_without_separator() {
        assert!(CustomId::parse("list_subcommand_buttonnext_1", "list_subcommand_button").is_none());
        assert!(!CustomId::has_namespace("list_subcommand_buttons_next_1", "list_subcommand_button"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_owner() {
        assert!(CustomId::parse("list_subcommand_button_next_abc", "list_subcommand_button").is_none());
    }

    #[test]
    fn test_parse_rejects_missing_action() {
        assert!(CustomId::parse("list_subcommand_button__42", "list_subcommand_button").is_none());
        assert!(CustomId::parse("list_subcommand_button_42", "list_subcommand_button").is_none());
    }
}
