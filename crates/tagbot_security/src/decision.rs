//! Authorization outcomes and the user-facing denial texts.

use serde::{Deserialize, Serialize};
use tagbot_core::Permission;

/// Shown when the actor lacks every role configured for the command.
pub const NO_ROLE_MESSAGE: &str = "Sorry but you can't use this command.";

/// Appended when the guild has not configured the roles at all.
pub const NO_ROLE_CONFIG_HINT: &str =
    " Configuration of roles required. Please check with the server administrator.";

/// Result of evaluating a command's [`AccessPolicy`](crate::AccessPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Decision {
    /// Every layer passed
    #[display("allowed")]
    Allowed,
    /// The bot lacks platform permissions the command needs
    #[display("denied: missing permissions ({})", format_missing_permissions(missing))]
    DeniedNoPermission {
        /// Required permissions that were not granted, in flag order
        missing: Vec<Permission>,
    },
    /// The command needs configured roles and the guild has none configured
    #[display("denied: roles not configured")]
    DeniedNoRoleNoConfig,
    /// The guild configured roles for the command and the actor holds none of them
    #[display("denied: missing configured role")]
    DeniedNoRoleWithConfig,
}

impl Decision {
    /// True for [`Decision::Allowed`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Text to reply with, `None` when allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagbot_core::Permission;
    /// use tagbot_security::Decision;
    ///
    /// let decision = Decision::DeniedNoPermission { missing: vec![Permission::SendMessages] };
    /// assert_eq!(
    ///     decision.denial_message().as_deref(),
    ///     Some("I'm missing permissions! (Send Messages)")
    /// );
    /// ```
    pub fn denial_message(&self) -> Option<String> {
        match self {
            Self::Allowed => None,
            Self::DeniedNoPermission { missing } => Some(format!(
                "I'm missing permissions! ({})",
                format_missing_permissions(missing)
            )),
            Self::DeniedNoRoleNoConfig => Some(format!("{NO_ROLE_MESSAGE}{NO_ROLE_CONFIG_HINT}")),
            Self::DeniedNoRoleWithConfig => Some(NO_ROLE_MESSAGE.to_string()),
        }
    }
}

/// Join permission names for display.
///
/// Up to two names are joined with `" & "`, longer lists with `", "`.
///
/// # Examples
///
/// ```
/// use tagbot_core::Permission;
/// use tagbot_security::format_missing_permissions;
///
/// assert_eq!(
///     format_missing_permissions(&[Permission::SendMessages, Permission::EmbedLinks]),
///     "Send Messages & Embed Links"
/// );
/// ```
pub fn format_missing_permissions(missing: &[Permission]) -> String {
    let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
    if names.len() <= 2 {
        names.join(" & ")
    } else {
        names.join(", ")
    }
}
