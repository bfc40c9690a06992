//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopsphere_core::{Email, Role, UserId};

use super::session::CurrentUser;

/// A user record as stored in the `users.json` fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Permission level. Missing/unknown roles degrade to guest.
    #[serde(default)]
    pub role: Role,
    /// Argon2id password hash (PHC string).
    pub password_hash: String,
    /// When the account was created.
    pub join_date: DateTime<Utc>,
}

impl StoredUser {
    /// The session principal for this user.
    #[must_use]
    pub fn to_current(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}
