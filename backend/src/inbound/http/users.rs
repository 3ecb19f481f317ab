//! User API handlers.
//!
//! ```text
//! GET    /users?offset&limit&order
//! GET    /users/{id}
//! POST   /users
//! PATCH  /users/{id}
//! DELETE /users/{id}
//! GET    /users/{id}/saved-products
//! GET    /users/{id}/orders
//! ```
//!
//! Creating a user also creates its preference record atomically; a patch
//! carrying `userPreference` is forwarded as a nested update of that record.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, NewUser, User, UserPatch, UserValidationError, UserWithPreference};
use crate::inbound::http::ApiResult;
use crate::inbound::http::orders::OrderResponse;
use crate::inbound::http::products::ProductResponse;
use crate::inbound::http::query::UserListQuery;
use crate::inbound::http::state::HttpState;

/// Nested preference body used on create and in responses.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPreferenceBody {
    pub receive_email: bool,
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Created together with the user; defaults to not receiving email.
    #[serde(default)]
    pub user_preference: Option<UserPreferenceBody>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let receive_email = value.user_preference.is_some_and(|p| p.receive_email);
        NewUser::try_new(value.name, value.email, receive_email)
    }
}

/// Nested preference body accepted on patch.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchUserPreferenceBody {
    #[serde(default)]
    pub receive_email: Option<bool>,
}

/// Request body for `PATCH /users/{id}`; absent fields are unchanged.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_preference: Option<PatchUserPreferenceBody>,
}

impl TryFrom<PatchUserRequest> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: PatchUserRequest) -> Result<Self, Self::Error> {
        let receive_email = value.user_preference.and_then(|p| p.receive_email);
        UserPatch::try_new(value.name, value.email, receive_email)
    }
}

/// User representation returned by the listing.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// User representation returned by reads that include the preference.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_preference: Option<UserPreferenceBody>,
}

impl From<UserWithPreference> for UserDetailResponse {
    fn from(value: UserWithPreference) -> Self {
        Self {
            id: value.user.id,
            name: value.user.name,
            email: value.user.email,
            created_at: value.user.created_at,
            user_preference: value.preference.map(|p| UserPreferenceBody {
                receive_email: p.receive_email,
            }),
        }
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    Error::validation(err.to_string())
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

/// List users, newest first unless overridden.
#[utoipa::path(
    get,
    path = "/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Users inside the requested window", body = [UserResponse]),
        (status = 400, description = "Invalid query parameters", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserListQuery>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list(query.page(), query.sort_order()).await?;

    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a single user with its preference.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserDetailResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserDetailResponse>> {
    let user = state
        .users
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(user_not_found)?;

    Ok(web::Json(user.into()))
}

/// Create a user together with its preference record.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user with its preference", body = UserDetailResponse),
        (status = 400, description = "Invalid payload", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let input = NewUser::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let created = state.users.create(&input).await?;

    Ok(HttpResponse::Created().json(UserDetailResponse::from(created)))
}

/// Apply a partial update, forwarding `userPreference` as a nested update.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "Updated user with its preference", body = UserDetailResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 404, description = "Unknown user or missing preference record", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<PatchUserRequest>,
) -> ApiResult<web::Json<UserDetailResponse>> {
    let patch = UserPatch::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let updated = state
        .users
        .update(path.into_inner(), &patch)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(web::Json(updated.into()))
}

/// Delete a user. Responds with a success message rather than 204; the
/// inconsistency with the product and order paths is part of the public
/// contract.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User removed"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state.users.delete(path.into_inner()).await?;
    if !removed {
        return Err(user_not_found());
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "user deleted" })))
}

/// Products the user has saved.
#[utoipa::path(
    get,
    path = "/users/{id}/saved-products",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Saved products", body = [ProductResponse]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "listSavedProducts"
)]
#[get("/users/{id}/saved-products")]
pub async fn list_saved_products(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state
        .users
        .saved_products(path.into_inner())
        .await?
        .ok_or_else(user_not_found)?;

    Ok(web::Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Orders owned by the user, without their items.
#[utoipa::path(
    get,
    path = "/users/{id}/orders",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Orders owned by the user", body = [OrderResponse]),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUserOrders"
)]
#[get("/users/{id}/orders")]
pub async fn list_user_orders(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let orders = state
        .users
        .orders(path.into_inner())
        .await?
        .ok_or_else(user_not_found)?;

    Ok(web::Json(orders.into_iter().map(OrderResponse::from).collect()))
}
