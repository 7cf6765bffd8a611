//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserFilter};

/// Use-case port for listing and filtering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every stored user.
    async fn list_all(&self) -> Result<Vec<User>, Error>;

    /// Return users matching both substring patterns of `filter`.
    async fn filter(&self, filter: &UserFilter) -> Result<Vec<User>, Error>;
}
