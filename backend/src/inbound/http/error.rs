//! `ResponseError` for the domain [`Error`].
//!
//! Validation failures become 400 with their details intact. Everything
//! else becomes 500 and keeps only the message, which adapters have already
//! sanitised.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, Error>;

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut response = HttpResponse::build(status);
        if let Some(trace_id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_string()));
        }

        if status.is_server_error() {
            error!(message = self.message(), details = ?self.details(), "request failed");
            response.json(self.clone().without_details())
        } else {
            response.json(self)
        }
    }
}
