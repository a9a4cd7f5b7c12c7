//! Persistence port for student user accounts.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::identity::EmailAddress;
use crate::domain::user::User;

/// Errors surfaced by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Store connectivity failed (pool checkout, network, timeout).
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserStoreError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Document-store port for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by login email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError>;

    /// Insert the user, or replace the record sharing its email.
    async fn upsert(&self, user: &User) -> Result<(), UserStoreError>;
}

/// In-memory user store used by tests and database-less deployments.
#[derive(Default)]
pub struct FixtureUserStore {
    users: Mutex<Vec<User>>,
}

impl FixtureUserStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        let guard = self
            .users
            .lock()
            .map_err(|_| UserStoreError::query("fixture store lock poisoned"))?;
        Ok(guard.iter().find(|user| &user.email == email).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|_| UserStoreError::query("fixture store lock poisoned"))?;
        if let Some(existing) = guard.iter_mut().find(|stored| stored.email == user.email) {
            *existing = user.clone();
        } else {
            guard.push(user.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Username;
    use rstest::rstest;
    use uuid::Uuid;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            username: Username::new("asha").expect("username"),
            email: EmailAddress::new(email).expect("email"),
            branch: String::new(),
            section: String::new(),
            batch_start: None,
            batch_end: None,
            wishlist: Vec::new(),
            reminders: Vec::new(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_by_email() {
        let store = FixtureUserStore::new();
        let mut account = user("asha@x.edu");
        store.upsert(&account).await.expect("insert");

        account.wishlist_add("drama");
        store.upsert(&account).await.expect("replace");

        let email = EmailAddress::new("asha@x.edu").expect("email");
        let loaded = store
            .find_by_email(&email)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(loaded.wishlist.len(), 1);
    }
}
