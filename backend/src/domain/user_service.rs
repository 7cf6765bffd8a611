//! User use-cases backed by the [`UserRepository`] port.
//!
//! The service owns validation and error categorisation; the repository only
//! moves rows. Every failure leaves this module as a domain [`Error`] whose
//! message reads `"<category>: <cause>"`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserFilter, UserId, UserValidationError};

const CREATE_FAILED: &str = "Error creating user";
const FETCH_FAILED: &str = "Error fetching users";
const UPDATE_FAILED: &str = "Error updating user";
const DELETE_FAILED: &str = "Error deleting user";

/// Domain service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

/// Map a validation failure to a client error carrying field context.
pub fn map_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(format!("Sent parameters are invalid: {err}")).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

fn map_persistence_error(operation: &str, err: UserPersistenceError) -> Error {
    debug!(%operation, error = %err, "user repository call failed");
    match err {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("Error starting db transaction: {message}"))
        }
        UserPersistenceError::Query { message } => Error::internal(format!("{operation}: {message}")),
        UserPersistenceError::Decode { message } => {
            Error::internal(format!("Problem scanning fetched users: {message}"))
        }
        err @ UserPersistenceError::NotFound { .. } => {
            Error::internal(format!("Couldn't fetch any user with provided 'id': {err}"))
        }
    }
}

#[async_trait]
impl UsersCommand for UserService {
    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        draft.validate().map_err(map_validation_error)?;
        let user = draft.into_user(UserId::random());
        self.repository
            .create(&user)
            .await
            .map_err(|err| map_persistence_error(CREATE_FAILED, err))?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        draft.validate().map_err(map_validation_error)?;
        let user = draft.into_user(id);
        let touched = self
            .repository
            .update(&user)
            .await
            .map_err(|err| map_persistence_error(UPDATE_FAILED, err))?;
        if touched == 0 {
            debug!(user_id = %user.id(), "update matched no rows");
        }
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<User, Error> {
        let user = self
            .repository
            .delete(id)
            .await
            .map_err(|err| map_persistence_error(DELETE_FAILED, err))?;
        debug!(user_id = %user.id(), "user deleted");
        Ok(user)
    }
}

#[async_trait]
impl UsersQuery for UserService {
    async fn list_all(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(|err| map_persistence_error(FETCH_FAILED, err))
    }

    async fn filter(&self, filter: &UserFilter) -> Result<Vec<User>, Error> {
        self.repository
            .filter(filter)
            .await
            .map_err(|err| map_persistence_error(FETCH_FAILED, err))
    }
}
