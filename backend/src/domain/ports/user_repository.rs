//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    ///
    /// Messages are sanitised by the adapter and safe to show to clients.
    pub enum UserPersistenceError {
        /// A connection could not be checked out or the transaction could
        /// not be started.
        Connection { message: String } => "{message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "{message}",
        /// A fetched row could not be decoded into a user.
        Decode { message: String } => "{message}",
        /// No row matched the requested identifier.
        NotFound { id: String } => "no user found with id {id}",
    }
}

/// Driven port for the `users` table.
///
/// Every method runs as a single statement inside its own transaction. A
/// failing call leaves storage unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user row.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch every user, in storage order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch users whose name and email contain the filter patterns.
    async fn filter(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError>;

    /// Overwrite name and email of the row with the user's id.
    ///
    /// Returns the number of rows touched; zero is not an error.
    async fn update(&self, user: &User) -> Result<usize, UserPersistenceError>;

    /// Remove a user and return the deleted row.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when no row matched.
    async fn delete(&self, id: &UserId) -> Result<User, UserPersistenceError>;
}
