//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user CRUD routes, the health probes, the request
//! and envelope types, and the error wrappers from
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI (debug
//! builds) and is printed by `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    FilterRequest, UserEnvelope, UserListEnvelope, UserRequest, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users service API",
        description = "CRUD operations over user records, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::read_all_users,
        crate::inbound::http::users::filter_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequest,
        FilterRequest,
        UserResponse,
        UserEnvelope,
        UserListEnvelope,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
