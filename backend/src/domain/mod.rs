//! Domain primitives, use-cases, and ports.
//!
//! Purpose: define the user entity and its validation rules, the
//! transport-agnostic error payload, and the services inbound adapters call.
//! Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error: error payload with a stable code.
//! - User, UserDraft, UserFilter, UserId: the user resource.
//! - UserService: implements the `UsersCommand` and `UsersQuery` ports.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmptyUserId, NAME_MAX, NAME_MIN, User, UserDraft, UserFilter, UserId, UserValidationError,
};
pub use self::user_service::UserService;
