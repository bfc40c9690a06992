//! User management.

use chrono::Utc;
use thiserror::Error;

use shopsphere_core::{Email, Role, UserId};

use shopsphere_storefront::fixtures::{load_fixture, store_fixture};
use shopsphere_storefront::models::StoredUser;
use shopsphere_storefront::services::auth::hash_password;

/// Errors from user management commands.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// The role string is not one of `user`, `admin`, `superadmin`.
    #[error("invalid role {0:?} (expected user, admin, or superadmin)")]
    InvalidRole(String),

    /// An account with this email already exists in the fixture.
    #[error("an account with email {0} already exists")]
    EmailTaken(String),
}

/// Append a user to the `users.json` fixture.
///
/// # Errors
///
/// Returns an error if the fixture cannot be read/written, the role string
/// is invalid, or the email is already taken.
pub fn create(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let role: Role = role
        .parse()
        .map_err(|_| UserCommandError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email)?;

    let path = super::data_dir().join("users.json");
    let mut users: Vec<StoredUser> = load_fixture(&path)?;

    if users
        .iter()
        .any(|user| user.email.as_str().eq_ignore_ascii_case(email.as_str()))
    {
        return Err(UserCommandError::EmailTaken(email.to_string()).into());
    }

    let next_id = users.iter().map(|user| user.id.as_i64()).max().unwrap_or(0) + 1;
    let user = StoredUser {
        id: UserId::new(next_id),
        email,
        name: name.to_owned(),
        role,
        password_hash: hash_password(password)?,
        join_date: Utc::now(),
    };

    tracing::info!(user_id = %user.id, %role, "Creating user {}", user.email);
    users.push(user);
    store_fixture(&path, &users)?;

    Ok(())
}
