//! User data model and the validation rules applied before persistence.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed length for a user name, in characters.
pub const NAME_MIN: usize = 4;
/// Maximum allowed length for a user name, in characters.
pub const NAME_MAX: usize = 20;

/// Validation errors returned by [`UserDraft::validate`].
///
/// Rules are evaluated in declaration order; the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("Name can not be empty")]
    EmptyName,
    #[error("Name length must be between 4 and 20 characters")]
    InvalidNameLength,
    #[error("Email can not be empty")]
    EmptyEmail,
    #[error("Email must contain an '@' character")]
    InvalidEmail,
}

impl UserValidationError {
    /// Request field the failure refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName | Self::InvalidNameLength => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::InvalidNameLength => "invalid_name_length",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Error returned when constructing a [`UserId`] from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("user id must not be empty")]
pub struct EmptyUserId;

/// Opaque user identifier.
///
/// Generated identifiers are UUID v4 strings, but any non-empty string read
/// back from storage or supplied by a caller is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::UserId;
    ///
    /// assert!(UserId::new("abc").is_ok());
    /// assert!(UserId::new("").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyUserId> {
        let id = id.into();
        if id.is_empty() {
            return Err(EmptyUserId);
        }
        Ok(Self(id))
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = EmptyUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Candidate user record submitted by a client, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Requested display name.
    pub name: String,
    /// Requested contact address.
    pub email: String,
}

impl UserDraft {
    /// Build a draft from raw field values.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check structural validity of the draft.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::{UserDraft, UserValidationError};
    ///
    /// assert!(UserDraft::new("Ramiro", "ramiro@ramiro.com").validate().is_ok());
    /// assert_eq!(
    ///     UserDraft::new("ra", "ramiro@ramiro.com").validate(),
    ///     Err(UserValidationError::InvalidNameLength)
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        let length = self.name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&length) {
            return Err(UserValidationError::InvalidNameLength);
        }

        if self.email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }

        if !self.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(())
    }

    /// Attach an identifier, producing a full [`User`].
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is non-empty.
///
/// Name and email are not re-validated when read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Build a user from its parts.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Substring filter applied to names and emails.
///
/// An empty pattern matches every value, so [`UserFilter::default`] matches
/// all users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Literal substring matched against names.
    pub name: String,
    /// Literal substring matched against emails.
    pub email: String,
}

impl UserFilter {
    /// Build a filter from raw patterns.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Whether `user` satisfies both patterns.
    pub fn matches(&self, user: &User) -> bool {
        user.name().contains(self.name.as_str()) && user.email().contains(self.email.as_str())
    }
}
