//! Domain types for the door ledger with strong typing.
//!
//! Identifiers follow the newtype pattern so a recipient id can never be
//! passed where an organization id is expected.

pub mod events;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                debug_assert!(id >= 0, concat!(stringify!($name), " should be non-negative"));
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_i32(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let id = i32::deserialize(deserializer)?;
                Ok(Self::new(id))
            }
        }
    };
}

entity_id!(
    /// Identifier of a row in `user_profiles`.
    ///
    /// ```rust
    /// use opendoors::domain::UserId;
    ///
    /// let id = UserId::new(7);
    /// assert_eq!(id.value(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    UserId
);
entity_id!(
    /// Identifier of a row in `organizations`.
    OrganizationId
);
entity_id!(
    /// Identifier of an append-only `door_distributions` ledger entry.
    DistributionId
);
entity_id!(PrizeId);

/// Role of a profile. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    User,
    Distributor,
    Admin,
}

impl UserType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Distributor => "distributor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "distributor" => Ok(Self::Distributor),
            "admin" => Ok(Self::Admin),
            other => anyhow::bail!("Unknown user type: {other}"),
        }
    }
}

/// Human-readable name of a profile referenced by a ledger row.
///
/// The store performs no joins, so a referenced profile can be missing.
/// That case is kept explicit instead of collapsing into a placeholder
/// string; the row it decorates is never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum DisplayName {
    Known(String),
    Unknown,
}

impl DisplayName {
    pub const UNKNOWN_LABEL: &'static str = "Unknown";

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(name) => name,
            Self::Unknown => Self::UNKNOWN_LABEL,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the display name for a profile: "first last" when either part is
/// present, otherwise the email.
#[must_use]
pub fn profile_display_name(
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: &str,
) -> String {
    let parts: Vec<&str> = [first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        email.to_string()
    } else {
        parts.join(" ")
    }
}
