//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserFilter, UserId};

/// In-process [`UserRepository`] backed by a `Vec`.
///
/// Rows keep insertion order. A failure can be armed with
/// [`InMemoryUserRepository::fail_next`]; it is returned by the next call
/// and then cleared.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use users_backend::domain::ports::UsersQuery;
/// use users_backend::domain::UserService;
/// use users_backend::test_support::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = UserService::new(Arc::new(InMemoryUserRepository::default()));
/// assert!(service.list_all().await.expect("list").is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
    next_failure: Mutex<Option<UserPersistenceError>>,
}

impl InMemoryUserRepository {
    /// Create a repository pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            rows: Mutex::new(users.into_iter().collect()),
            next_failure: Mutex::new(None),
        }
    }

    /// Make the next repository call fail with `error`.
    pub fn fail_next(&self, error: UserPersistenceError) {
        *lock(&self.next_failure) = Some(error);
    }

    /// Snapshot of the stored rows.
    pub fn snapshot(&self) -> Vec<User> {
        lock(&self.rows).clone()
    }

    fn check_failure(&self) -> Result<(), UserPersistenceError> {
        match lock(&self.next_failure).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.check_failure()?;
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.id() == user.id()) {
            return Err(UserPersistenceError::query("user id already exists"));
        }
        rows.push(user.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.check_failure()?;
        Ok(self.snapshot())
    }

    async fn filter(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError> {
        self.check_failure()?;
        Ok(lock(&self.rows)
            .iter()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> Result<usize, UserPersistenceError> {
        self.check_failure()?;
        let mut rows = lock(&self.rows);
        let mut touched = 0;
        for row in rows.iter_mut().filter(|row| row.id() == user.id()) {
            *row = user.clone();
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        self.check_failure()?;
        let mut rows = lock(&self.rows);
        match rows.iter().position(|row| row.id() == id) {
            Some(index) => Ok(rows.remove(index)),
            None => Err(UserPersistenceError::not_found(id.as_ref())),
        }
    }
}
