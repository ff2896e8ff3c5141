//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users        {"name":"Dave","age":14}
//! PUT    /api/users/{id}   {"name":"Dave","age":0}
//! DELETE /api/users/{id}
//! ```
//!
//! Identifiers are read from their leading digits (`1x` is `1`); those with
//! no leading digits are answered exactly like identifiers with no record
//! behind them. Bodies are read as raw bytes and decoded inside the handler:
//! a missing body or a non-JSON content type counts as an empty payload, and
//! any decode failure is a name validation failure.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::domain::ports::UserStoreError;
use crate::domain::{
    AgeChange, DomainError, NewUser, User, UserChanges, UserId, UserName, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;

/// Body returned when no record matches the requested identifier.
pub const USER_NOT_FOUND_MESSAGE: &str = "User with the given ID not found.";

/// Body returned when the submitted name fails validation.
pub const INVALID_NAME_MESSAGE: &str = "Name is required and should be at least 3 characters.";

/// Request body for `POST /api/users` and `PUT /api/users/{id}`.
///
/// `age` keeps three states apart: an absent key (`None`), an explicit
/// `null` (`Some(None)`) and a value (`Some(Some(n))`).
///
/// Example JSON:
/// `{"name":"Dave","age":14}`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserPayload {
    /// Requested name; validated on conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Dave")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    /// Age key: `None` when absent, `Some(None)` for an explicit `null`.
    #[schema(value_type = Option<i64>, example = 14)]
    pub age: Option<Option<i64>>,
}

/// Mark a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn is_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// Decode a request body into a [`UserPayload`].
///
/// An empty body or a content type other than `application/json` yields the
/// empty payload, which then fails name validation.
fn decode_payload(req: &HttpRequest, body: &[u8]) -> ApiResult<UserPayload> {
    if body.is_empty() || !is_json(req) {
        return Ok(UserPayload::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, path = %req.path(), "rejected request body");
        DomainError::invalid_request(INVALID_NAME_MESSAGE)
    })
}

fn validated_name(name: Option<String>) -> Result<UserName, UserValidationError> {
    UserName::new(name.ok_or(UserValidationError::MissingName)?)
}

impl TryFrom<UserPayload> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        let UserPayload { name, age } = value;
        Ok(Self {
            name: validated_name(name)?,
            age: age.flatten(),
        })
    }
}

impl TryFrom<UserPayload> for UserChanges {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        let UserPayload { name, age } = value;
        Ok(Self {
            name: validated_name(name)?,
            age: age.map_or(AgeChange::Keep, AgeChange::Set),
        })
    }
}

fn map_validation_error(err: UserValidationError) -> DomainError {
    match err {
        UserValidationError::MissingName | UserValidationError::NameTooShort { .. } => {
            DomainError::invalid_request(INVALID_NAME_MESSAGE)
        }
    }
}

fn map_store_error(err: UserStoreError) -> DomainError {
    match err {
        UserStoreError::NotFound { .. } => DomainError::not_found(USER_NOT_FOUND_MESSAGE),
        UserStoreError::Poisoned => DomainError::internal(err.to_string()),
    }
}

fn parse_id(raw: &str) -> ApiResult<UserId> {
    UserId::parse(raw).ok_or_else(|| DomainError::not_found(USER_NOT_FOUND_MESSAGE))
}

/// List every user in insertion order.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await.map_err(map_store_error)?;
    Ok(web::Json(users))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "No such user", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(&path)?;
    let user = state.users.find(id).await.map_err(map_store_error)?;
    Ok(web::Json(user))
}

/// Create a user under the next free identifier.
///
/// Responds `200` rather than `201` with the created record.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Created user", body = UserSchema),
        (status = 400, description = "Invalid name", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let payload = decode_payload(&req, &body)?;
    let draft = NewUser::try_from(payload).map_err(map_validation_error)?;
    let user = state.users.insert(draft).await.map_err(map_store_error)?;
    info!(user_id = %user.id(), "user created");
    Ok(web::Json(user))
}

/// Replace a user's name and, when the body carries an `age` key, its age.
///
/// Existence is checked before the body is decoded, so an unknown identifier
/// yields `404` even when the body is missing or the name is invalid.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid name", body = String, content_type = "text/plain"),
        (status = 404, description = "No such user", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(&path)?;
    state.users.find(id).await.map_err(map_store_error)?;
    let payload = decode_payload(&req, &body)?;
    let changes = UserChanges::try_from(payload).map_err(map_validation_error)?;
    let user = state
        .users
        .update(id, changes)
        .await
        .map_err(map_store_error)?;
    info!(user_id = %id, "user updated");
    Ok(web::Json(user))
}

/// Remove a user and return the removed record.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = UserSchema),
        (status = 404, description = "No such user", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(&path)?;
    let user = state.users.delete(id).await.map_err(map_store_error)?;
    info!(user_id = %id, "user deleted");
    Ok(web::Json(user))
}
