//! Failure value returned by every use-case.
//!
//! [`Error`] knows nothing about HTTP; the inbound adapter decides the status
//! code from [`ErrorCode`] and serialises the rest as the response body.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trace_id::TraceId;

/// Response header carrying the request's [`TraceId`].
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Failure category.
///
/// Client mistakes map to 400 and everything else to 500; there is no
/// `not_found` or `conflict` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Storage or another internal dependency failed.
    InternalError,
}

impl ErrorCode {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Bad request",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Categorised failure with a client-facing message.
///
/// The message is never blank: an empty one is replaced by a generic text
/// for the code. Errors built while a request is in flight pick up its
/// [`TraceId`].
///
/// # Examples
/// ```
/// use users_backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("Bad request: missing id");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "Bad request: missing id");
///
/// assert_eq!(Error::internal("  ").message(), "Internal server error");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorBody", into = "ErrorBody")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
    details: Option<Value>,
}

/// Reasons a serialised error body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// `message` was missing or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// `traceId` was present but not a UUID.
    #[error("trace identifier is not a UUID: {0}")]
    MalformedTraceId(String),
}

impl Error {
    /// Build an error in the current trace scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            code.fallback_message().clone_into(&mut message);
        }
        Self {
            code,
            message,
            trace_id: TraceId::current(),
            details: None,
        }
    }

    /// [`ErrorCode::InvalidRequest`] shorthand.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::InternalError`] shorthand.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Request the error belongs to.
    pub const fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Structured context, e.g. the field that failed validation.
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the captured trace id.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach structured context.
    ///
    /// ```
    /// use serde_json::json;
    /// use users_backend::domain::Error;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "name" })));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Strip structured context.
    #[must_use]
    pub fn without_details(mut self) -> Self {
        self.details = None;
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Wire shape of [`Error`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: ErrorCode,
    #[serde(default)]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorBody {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id.map(|id| id.to_string()),
            details: value.details,
        }
    }
}

impl TryFrom<ErrorBody> for Error {
    type Error = ErrorValidationError;

    // Decoded bodies keep the trace id they carry, never the ambient one.
    fn try_from(body: ErrorBody) -> Result<Self, Self::Error> {
        if body.message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        let trace_id = body
            .trace_id
            .map(|raw| {
                raw.parse::<TraceId>()
                    .map_err(|_| ErrorValidationError::MalformedTraceId(raw))
            })
            .transpose()?;
        Ok(Self {
            code: body.code,
            message: body.message,
            trace_id,
            details: body.details,
        })
    }
}
