//! Storage contract for user accounts.
//!
//! Uses native async traits (Rust 2024 edition). Implementations must keep
//! `email` and `username` unique and report violations from
//! [`UserRepository::save`] as [`PlatformError::Conflict`].

pub mod memory;

pub use memory::MemoryUserRepository;

use crate::identity::{UserId, UserIdentity};
use rust_common::PlatformError;
use std::future::Future;

/// Account storage used by the token service.
pub trait UserRepository: Send + Sync {
    /// Look up an account by id.
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<UserIdentity>, PlatformError>> + Send;

    /// Look up an account by exact email address.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserIdentity>, PlatformError>> + Send;

    /// Look up an account by exact username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<UserIdentity>, PlatformError>> + Send;

    /// Insert or replace an account atomically.
    fn save(&self, user: &UserIdentity) -> impl Future<Output = Result<(), PlatformError>> + Send;
}
