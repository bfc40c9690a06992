//! Authentication service.
//!
//! Email/password authentication against the fixture user store.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use shopsphere_core::Email;

use crate::models::StoredUser;
use crate::stores::{UserStore, UserStoreError};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration and login. The resulting [`StoredUser`] becomes
/// the session principal wholesale; authentication never partially mutates
/// an existing principal.
pub struct AuthService<'a> {
    users: &'a UserStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserStore) -> Self {
        Self { users }
    }

    /// Register a new user with email and password.
    ///
    /// New accounts always get the `user` role; privileged roles are granted
    /// only through the superadmin console or the CLI.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<StoredUser, AuthError> {
        // Validate email
        let email = Email::parse(email)?;

        // Validate password
        validate_password(password)?;

        // Hash password
        let password_hash = hash_password(password)?;

        // Create user
        let user = self
            .users
            .insert(email, name.to_owned(), password_hash)
            .await
            .map_err(|e| match e {
                UserStoreError::EmailTaken => AuthError::UserAlreadyExists,
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<StoredUser, AuthError> {
        // Validate email format
        let email = Email::parse(email)?;

        // Find the user; a missing account and a wrong password are
        // indistinguishable to the caller
        let user = self
            .users
            .get_by_email(email.as_str())
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopsphere_core::Role;

    #[tokio::test]
    async fn test_register_then_login() {
        let store = UserStore::from_users(Vec::new());
        let auth = AuthService::new(&store);

        let registered = auth
            .register("shopper@example.com", "correct horse battery", "Shopper")
            .await
            .unwrap();
        assert_eq!(registered.role, Role::User);

        let logged_in = auth
            .login("shopper@example.com", "correct horse battery")
            .await
            .unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let store = UserStore::from_users(Vec::new());
        let auth = AuthService::new(&store);

        auth.register("shopper@example.com", "correct horse battery", "Shopper")
            .await
            .unwrap();

        let result = auth.login("shopper@example.com", "wrong password!").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let store = UserStore::from_users(Vec::new());
        let auth = AuthService::new(&store);

        let result = auth.login("nobody@example.com", "whatever password").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let store = UserStore::from_users(Vec::new());
        let auth = AuthService::new(&store);

        let result = auth.register("shopper@example.com", "short", "Shopper").await;
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = UserStore::from_users(Vec::new());
        let auth = AuthService::new(&store);

        auth.register("shopper@example.com", "correct horse battery", "One")
            .await
            .unwrap();
        let result = auth
            .register("SHOPPER@example.com", "correct horse battery", "Two")
            .await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }
}
