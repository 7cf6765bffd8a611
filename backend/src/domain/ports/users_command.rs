//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Use-case port for creating, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate the draft, assign a fresh id, and persist it.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    /// Validate the draft and overwrite the user stored under `id`.
    ///
    /// Succeeds even when no stored user has that id.
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Delete the user stored under `id`, returning the removed record.
    async fn delete(&self, id: &UserId) -> Result<User, Error>;
}
