//! In-memory account storage for tests and development.

use crate::identity::{UserId, UserIdentity};
use crate::repository::UserRepository;
use rust_common::PlatformError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Account storage in a shared map.
///
/// Clones share the same accounts. Email and username uniqueness are
/// checked and the write applied under one lock, with exact-match
/// comparison.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, UserIdentity>>>,
}

impl MemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserIdentity>, PlatformError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserIdentity>, PlatformError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserIdentity>, PlatformError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn save(&self, user: &UserIdentity) -> Result<(), PlatformError> {
        let mut users = self.users.write().await;

        for other in users.values().filter(|other| other.id() != user.id()) {
            if other.email() == user.email() {
                return Err(PlatformError::conflict(format!(
                    "email already in use by user {}",
                    other.id()
                )));
            }
            if other.username() == user.username() {
                return Err(PlatformError::conflict(format!(
                    "username already in use by user {}",
                    other.id()
                )));
            }
        }

        users.insert(user.id(), user.clone());
        debug!(user_id = %user.id(), "Saved user");
        Ok(())
    }
}
