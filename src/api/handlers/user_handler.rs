//! User handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{not_blank, UpdateUser, UserResponse};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginatedUsers, PaginationParams};

/// User update request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(custom(function = "not_blank", message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}

/// Public user listing
pub fn public_user_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

/// User routes that need a bearer token
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users, one page at a time
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsers)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let page = state.user_service.list_users(params).await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update own name and/or email
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only update own account"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_user(current_user.id, id, payload.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete own account together with owned quizzes
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only delete own account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.delete_user(current_user.id, id).await?;
    Ok(Json(UserResponse::from(user)))
}
