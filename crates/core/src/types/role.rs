//! Principal roles with different permission levels.

use serde::{Deserialize, Serialize};

/// The role attached to a principal.
///
/// A session starts as [`Role::Guest`] and the principal is replaced
/// wholesale on login and logout; profile edits never change the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Anonymous visitor; no account.
    #[default]
    Guest,
    /// Registered customer.
    User,
    /// Store management access.
    Admin,
    /// Full access including user management.
    SuperAdmin,
}

impl Role {
    /// Parse a role string, treating anything unrecognized as [`Role::Guest`].
    ///
    /// Authorization never fails on bad input; an unknown or missing role is
    /// simply the least-privileged one.
    #[must_use]
    pub fn parse_or_guest(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Whether this role belongs to a logged-in principal.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Guest)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "superadmin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
