//! Registration and authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{not_blank, UserResponse};
use crate::errors::AppResult;
use crate::services::AuthResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (must not be blank)
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Credentials submitted for authentication.
///
/// Not validated here: blank values fail like any other wrong credential.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthenticateRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Public account routes, mounted under `/api/users`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Authenticate and get a JWT token
#[utoipa::path(
    post,
    path = "/api/users/authenticate",
    tag = "Authentication",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Authentication successful", body = AuthResponse),
        (status = 401, description = "Username or password is incorrect")
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthenticateRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(response))
}
