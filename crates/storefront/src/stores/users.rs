//! Fixture-backed user store.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use shopsphere_core::{Email, Role, UserId};

use crate::fixtures::{FixtureError, load_fixture};
use crate::models::StoredUser;

/// Errors from user store mutations.
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// Another account already uses this email.
    #[error("an account with this email already exists")]
    EmailTaken,
}

/// In-memory user store seeded from `users.json`.
#[derive(Debug)]
pub struct UserStore {
    users: RwLock<Vec<StoredUser>>,
}

impl UserStore {
    /// Load the store from a `users.json` fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let users: Vec<StoredUser> = load_fixture(path)?;
        Ok(Self::from_users(users))
    }

    /// Build a store from an in-memory user list.
    #[must_use]
    pub fn from_users(users: Vec<StoredUser>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Look up a user by id.
    pub async fn get_by_id(&self, id: UserId) -> Option<StoredUser> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    /// Look up a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Option<StoredUser> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email.as_str().eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Create a new `user`-role account.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::EmailTaken`] if the email is already
    /// registered.
    pub async fn insert(
        &self,
        email: Email,
        name: String,
        password_hash: String,
    ) -> Result<StoredUser, UserStoreError> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|user| user.email.as_str().eq_ignore_ascii_case(email.as_str()))
        {
            return Err(UserStoreError::EmailTaken);
        }

        let next_id = users
            .iter()
            .map(|user| user.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        let user = StoredUser {
            id: UserId::new(next_id),
            email,
            name,
            role: Role::User,
            password_hash,
            join_date: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Update a user's display name. Returns the updated record if found.
    ///
    /// Profile-field edits never touch the role.
    pub async fn update_name(&self, id: UserId, name: String) -> Option<StoredUser> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|user| user.id == id)?;
        user.name = name;
        Some(user.clone())
    }

    /// Change a user's role. Returns the updated record if found.
    pub async fn update_role(&self, id: UserId, role: Role) -> Option<StoredUser> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|user| user.id == id)?;
        user.role = role;
        Some(user.clone())
    }

    /// Delete a user. Returns `true` if a record was removed.
    pub async fn remove(&self, id: UserId) -> bool {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| user.id != id);
        users.len() < before
    }

    /// All users, in fixture order.
    pub async fn all(&self) -> Vec<StoredUser> {
        self.users.read().await.clone()
    }

    /// Number of accounts.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stored(id: i64, email: &str, role: Role) -> StoredUser {
        StoredUser {
            id: UserId::new(id),
            email: Email::parse(email).unwrap(),
            name: format!("User {id}"),
            role,
            password_hash: "$argon2id$test".to_owned(),
            join_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_lookup_by_email_case_insensitive() {
        let store = UserStore::from_users(vec![stored(1, "admin@shopsphere.test", Role::Admin)]);

        let found = store.get_by_email("ADMIN@shopsphere.test").await.unwrap();
        assert_eq!(found.id, UserId::new(1));
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id_and_user_role() {
        let store = UserStore::from_users(vec![stored(7, "a@b.c", Role::SuperAdmin)]);

        let user = store
            .insert(
                Email::parse("new@shopsphere.test").unwrap(),
                "New User".to_owned(),
                "$argon2id$test".to_owned(),
            )
            .await
            .unwrap();

        assert_eq!(user.id, UserId::new(8));
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = UserStore::from_users(vec![stored(1, "a@b.c", Role::User)]);

        let result = store
            .insert(
                Email::parse("A@B.C").unwrap(),
                "Dup".to_owned(),
                "$argon2id$test".to_owned(),
            )
            .await;

        assert!(matches!(result, Err(UserStoreError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_update_name_preserves_role() {
        let store = UserStore::from_users(vec![stored(1, "a@b.c", Role::Admin)]);

        let updated = store.update_name(UserId::new(1), "Renamed".to_owned()).await;
        let updated = updated.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = UserStore::from_users(vec![stored(1, "a@b.c", Role::User)]);

        assert!(store.remove(UserId::new(1)).await);
        assert!(!store.remove(UserId::new(1)).await);
        assert_eq!(store.count().await, 0);
    }
}
