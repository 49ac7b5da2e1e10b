//! Platform permission flags.
//!
//! Bit positions match Discord's permission bitfield so the transport layer can
//! convert with [`PermissionSet::from_bits`] without a lookup table.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A single platform permission.
///
/// `Display` renders the human-readable name shown to users; `FromStr`
/// accepts both that name and the `SCREAMING_SNAKE_CASE` flag name.
///
/// # Examples
///
/// ```
/// use tagbot_core::Permission;
///
/// assert_eq!(Permission::SendMessages.to_string(), "Send Messages");
/// assert_eq!("SEND_MESSAGES".parse::<Permission>().unwrap(), Permission::SendMessages);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Create invites
    #[strum(serialize = "CREATE_INSTANT_INVITE", to_string = "Create Instant Invite")]
    CreateInstantInvite,
    /// Kick members
    #[strum(serialize = "KICK_MEMBERS", to_string = "Kick Members")]
    KickMembers,
    /// Ban members
    #[strum(serialize = "BAN_MEMBERS", to_string = "Ban Members")]
    BanMembers,
    /// Administrator; implies every other permission
    #[strum(serialize = "ADMINISTRATOR", to_string = "Administrator")]
    Administrator,
    /// Manage channels
    #[strum(serialize = "MANAGE_CHANNELS", to_string = "Manage Channels")]
    ManageChannels,
    /// Manage the guild
    #[strum(serialize = "MANAGE_GUILD", to_string = "Manage Server")]
    ManageGuild,
    /// Add reactions
    #[strum(serialize = "ADD_REACTIONS", to_string = "Add Reactions")]
    AddReactions,
    /// View the audit log
    #[strum(serialize = "VIEW_AUDIT_LOG", to_string = "View Audit Log")]
    ViewAuditLog,
    /// View channels
    #[strum(serialize = "VIEW_CHANNEL", to_string = "View Channel")]
    ViewChannel,
    /// Send messages
    #[strum(serialize = "SEND_MESSAGES", to_string = "Send Messages")]
    SendMessages,
    /// Manage messages
    #[strum(serialize = "MANAGE_MESSAGES", to_string = "Manage Messages")]
    ManageMessages,
    /// Embed links
    #[strum(serialize = "EMBED_LINKS", to_string = "Embed Links")]
    EmbedLinks,
    /// Attach files
    #[strum(serialize = "ATTACH_FILES", to_string = "Attach Files")]
    AttachFiles,
    /// Read message history
    #[strum(serialize = "READ_MESSAGE_HISTORY", to_string = "Read Message History")]
    ReadMessageHistory,
    /// Mention everyone
    #[strum(serialize = "MENTION_EVERYONE", to_string = "Mention Everyone")]
    MentionEveryone,
    /// Use external emojis
    #[strum(serialize = "USE_EXTERNAL_EMOJIS", to_string = "Use External Emojis")]
    UseExternalEmojis,
    /// Manage nicknames
    #[strum(serialize = "MANAGE_NICKNAMES", to_string = "Manage Nicknames")]
    ManageNicknames,
    /// Manage roles
    #[strum(serialize = "MANAGE_ROLES", to_string = "Manage Roles")]
    ManageRoles,
    /// Manage webhooks
    #[strum(serialize = "MANAGE_WEBHOOKS", to_string = "Manage Webhooks")]
    ManageWebhooks,
    /// Manage threads
    #[strum(serialize = "MANAGE_THREADS", to_string = "Manage Threads")]
    ManageThreads,
    /// Send messages in threads
    #[strum(serialize = "SEND_MESSAGES_IN_THREADS", to_string = "Send Messages In Threads")]
    SendMessagesInThreads,
    /// Time out members
    #[strum(serialize = "MODERATE_MEMBERS", to_string = "Timeout Members")]
    ModerateMembers,
}

impl Permission {
    /// Bit value in Discord's permission bitfield.
    pub const fn bit(self) -> u64 {
        match self {
            Self::CreateInstantInvite => 1 << 0,
            Self::KickMembers => 1 << 1,
            Self::BanMembers => 1 << 2,
            Self::Administrator => 1 << 3,
            Self::ManageChannels => 1 << 4,
            Self::ManageGuild => 1 << 5,
            Self::AddReactions => 1 << 6,
            Self::ViewAuditLog => 1 << 7,
            Self::ViewChannel => 1 << 10,
            Self::SendMessages => 1 << 11,
            Self::ManageMessages => 1 << 13,
            Self::EmbedLinks => 1 << 14,
            Self::AttachFiles => 1 << 15,
            Self::ReadMessageHistory => 1 << 16,
            Self::MentionEveryone => 1 << 17,
            Self::UseExternalEmojis => 1 << 18,
            Self::ManageNicknames => 1 << 27,
            Self::ManageRoles => 1 << 28,
            Self::ManageWebhooks => 1 << 29,
            Self::ManageThreads => 1 << 34,
            Self::SendMessagesInThreads => 1 << 38,
            Self::ModerateMembers => 1 << 40,
        }
    }
}

/// A set of permissions backed by a Discord bitfield.
///
/// Bits that do not correspond to a [`Permission`] variant are preserved but
/// never reported by [`PermissionSet::iter`].
///
/// # Examples
///
/// ```
/// use tagbot_core::{Permission, PermissionSet};
///
/// let granted = PermissionSet::from_iter([Permission::ViewChannel]);
/// let required = PermissionSet::from_iter([Permission::ViewChannel, Permission::SendMessages]);
/// assert!(!granted.covers(required));
/// assert_eq!(granted.missing(required), vec![Permission::SendMessages]);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{_0:#x}")]
#[serde(transparent)]
pub struct PermissionSet(u64);

impl PermissionSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a raw Discord bitfield.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw bitfield.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// True when no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when `permission` is present (ignoring the administrator override).
    pub const fn contains(self, permission: Permission) -> bool {
        self.0 & permission.bit() == permission.bit()
    }

    /// Add a permission.
    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    /// True when this set grants everything in `required`.
    ///
    /// Administrator grants every permission, matching how the platform
    /// resolves channel permissions.
    pub const fn covers(self, required: PermissionSet) -> bool {
        self.contains(Permission::Administrator) || self.0 & required.0 == required.0
    }

    /// Permissions in `required` this set does not grant, in flag order.
    pub fn missing(self, required: PermissionSet) -> Vec<Permission> {
        if self.covers(required) {
            return Vec::new();
        }
        required.iter().filter(|p| !self.contains(*p)).collect()
    }

    /// Iterate the known permissions present in this set, in flag order.
    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        Self(permission.bit())
    }
}
