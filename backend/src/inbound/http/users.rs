//! Users API handlers.
//!
//! ```text
//! POST   /api/users/create        {"name":"Ramiro","email":"Ramiro@ramiro.com"}
//! GET    /api/users/readall
//! GET    /api/users/filter        {"name":"Ram","email":"@ramiro.com"}
//! PUT    /api/users/update?id=ID  {"name":"Ramiro","email":"Ramiro@ramiro.com"}
//! DELETE /api/users/delete?id=ID
//! ```
//!
//! Bodies are read as raw bytes and decoded here so malformed JSON produces
//! the same error envelope as every other client failure.

use actix_web::{Scope, delete, get, post, put, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, User, UserDraft, UserFilter, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const MISSING_ID: &str = "Bad request: 'id' parameter must be sent through URL";

/// Request body for create and update.
///
/// Missing fields decode as empty strings and then fail validation. Any `id`
/// field is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    /// Display name, 4 to 20 characters.
    #[schema(example = "Ramiro")]
    pub name: String,
    /// Contact address; must contain `@`.
    #[schema(example = "Ramiro@ramiro.com")]
    pub email: String,
}

impl From<UserRequest> for UserDraft {
    fn from(value: UserRequest) -> Self {
        Self::new(value.name, value.email)
    }
}

/// Optional request body for the filter endpoint.
///
/// Each field is a literal substring; an empty or missing field matches all.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct FilterRequest {
    /// Substring the name must contain.
    #[schema(example = "Ram")]
    pub name: String,
    /// Substring the email must contain.
    #[schema(example = "@ramiro.com")]
    pub email: String,
}

impl From<FilterRequest> for UserFilter {
    fn from(value: FilterRequest) -> Self {
        Self::new(value.name, value.email)
    }
}

/// Query string carrying the target user id.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Identifier of the user to modify.
    pub id: Option<String>,
}

impl IdQuery {
    fn require(&self) -> Result<UserId, Error> {
        self.id
            .as_deref()
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| Error::invalid_request(MISSING_ID))
    }
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Server-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name.
    #[schema(example = "Ramiro")]
    pub name: String,
    /// Contact address.
    #[schema(example = "Ramiro@ramiro.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            email: value.email().to_owned(),
        }
    }
}

/// Success envelope carrying one user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    /// Human-readable outcome.
    #[schema(example = "User created successfully")]
    pub message: String,
    /// The affected user.
    pub user: UserResponse,
}

impl UserEnvelope {
    fn new(message: &str, user: User) -> Self {
        Self {
            message: message.to_owned(),
            user: user.into(),
        }
    }
}

/// Success envelope carrying a list of users.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListEnvelope {
    /// Count of returned users.
    #[schema(example = "2 users where fetched")]
    pub message: String,
    /// Matching users in table order.
    pub user: Vec<UserResponse>,
}

impl From<Vec<User>> for UserListEnvelope {
    fn from(users: Vec<User>) -> Self {
        Self {
            message: format!("{} users where fetched", users.len()),
            user: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("Couldn't decode request body: {err}")))
}

/// Every user route, mounted under `/api/users`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::users::users_scope;
///
/// let app = App::new().service(users_scope());
/// ```
pub fn users_scope() -> Scope {
    web::scope("/api/users")
        .service(create_user)
        .service(read_all_users)
        .service(filter_users)
        .service(update_user)
        .service(delete_user)
}

/// Create a user with a server-generated id.
#[utoipa::path(
    post,
    path = "/api/users/create",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = UserEnvelope),
        (status = 400, description = "Undecodable body or invalid fields", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<UserEnvelope>> {
    let request: UserRequest = decode_body(&body)?;
    let user = state.users_command.create(request.into()).await?;
    Ok(web::Json(UserEnvelope::new("User created successfully", user)))
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/api/users/readall",
    responses(
        (status = 200, description = "Users", body = UserListEnvelope),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "readAllUsers"
)]
#[get("/readall")]
pub async fn read_all_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListEnvelope>> {
    let users = state.users_query.list_all().await?;
    Ok(web::Json(users.into()))
}

/// List users whose name and email contain the given substrings.
///
/// A missing or malformed body falls back to the empty filter, which
/// matches every user.
#[utoipa::path(
    get,
    path = "/api/users/filter",
    request_body(content = FilterRequest, description = "Optional substring filter"),
    responses(
        (status = 200, description = "Matching users", body = UserListEnvelope),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "filterUsers"
)]
#[get("/filter")]
pub async fn filter_users(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<UserListEnvelope>> {
    let filter = match serde_json::from_slice::<FilterRequest>(&body) {
        Ok(request) => UserFilter::from(request),
        Err(err) => {
            debug!(error = %err, "filter body absent or undecodable; matching all users");
            UserFilter::default()
        }
    };
    let users = state.users_query.filter(&filter).await?;
    Ok(web::Json(users.into()))
}

/// Overwrite the name and email of the user with the given id.
///
/// Reports success even when no user has that id.
#[utoipa::path(
    put,
    path = "/api/users/update",
    params(IdQuery),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Missing id, undecodable body or invalid fields", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/update")]
pub async fn update_user(
    state: web::Data<HttpState>,
    query: web::Query<IdQuery>,
    body: web::Bytes,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = query.require()?;
    let request: UserRequest = decode_body(&body)?;
    let user = state.users_command.update(id, request.into()).await?;
    Ok(web::Json(UserEnvelope::new("User updated successfully", user)))
}

/// Delete the user with the given id and return it.
#[utoipa::path(
    delete,
    path = "/api/users/delete",
    params(IdQuery),
    responses(
        (status = 200, description = "User deleted", body = UserEnvelope),
        (status = 400, description = "Missing id", body = ErrorSchema),
        (status = 500, description = "No such user or storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = query.require()?;
    let user = state.users_command.delete(&id).await?;
    Ok(web::Json(UserEnvelope::new("User deleted successfully", user)))
}
