//! OpenAPI stand-ins for domain types.
//!
//! The domain crate stays free of `utoipa`; these shadows describe the JSON
//! that [`crate::domain::Error`] serialises to.

use utoipa::ToSchema;

/// Documents [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Answered with 400.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Answered with 500.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Documents [`crate::domain::Error`]: every failed call answers with this
/// body.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "fields exist only to shape the OpenAPI schema")]
pub struct ErrorSchema {
    /// Failure category.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// What went wrong, prefixed by the failing operation.
    #[schema(example = "Sent parameters are invalid: Name can not be empty")]
    message: String,
    /// Same value as the `trace-id` response header.
    #[schema(example = "6f1c1f2a-3f44-4b8e-9d6a-2d1c5e0b7a10")]
    trace_id: Option<String>,
    /// Offending field and validation code; only on 400 responses.
    details: Option<serde_json::Value>,
}
