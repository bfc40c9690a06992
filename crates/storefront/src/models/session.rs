//! Session-related types.
//!
//! Types stored in the session: the current principal and the cart itself.

use serde::{Deserialize, Serialize};

use shopsphere_core::{Email, Role, UserId};

/// Session-stored principal.
///
/// Minimal data identifying the logged-in user. Replaced wholesale on login
/// and logout; a session without one is a guest. A missing or unrecognized
/// role deserializes to [`Role::Guest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's fixture-store ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Permission level.
    #[serde(default)]
    pub role: Role,
}

/// Session keys for stored state.
pub mod keys {
    /// Key for storing the current logged-in principal.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}
