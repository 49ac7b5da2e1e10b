//! Snowflake identifiers and logical role names.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
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
            derive_more::Display,
            derive_more::From,
            derive_more::Into,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw snowflake.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// The raw snowflake value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map(Self)
            }
        }
    };
}

snowflake!(
    /// Discord user identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagbot_core::UserId;
    ///
    /// let id: UserId = "42".parse().unwrap();
    /// assert_eq!(id, UserId::new(42));
    /// assert_eq!(id.to_string(), "42");
    /// ```
    UserId
);

snowflake!(
    /// Discord guild (server) identifier.
    GuildId
);

snowflake!(
    /// Discord role identifier.
    RoleId
);

/// Logical permission name a guild maps to concrete roles, e.g. `"moderator"`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ConfigRoleName(String);

impl ConfigRoleName {
    /// Create a role name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConfigRoleName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
