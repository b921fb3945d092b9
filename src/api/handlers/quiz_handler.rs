//! Quiz handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{not_blank, NewQuestion, NewQuiz, Quiz, UpdateQuiz};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, NoContent, Paginated, PaginatedQuizzes, PaginationParams};

/// Quiz header fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuizFields {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    #[schema(example = "Nordic capitals")]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    #[schema(example = "How well do you know the north?")]
    pub description: String,
}

/// Quiz creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuizRequest {
    #[validate(nested)]
    pub quiz: QuizFields,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<NewQuestion>,
}

/// Quiz update request. The body id must match the path id.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuizRequest {
    #[schema(example = 1)]
    pub id: i32,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    #[schema(example = "Nordic capitals")]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    #[schema(example = "Updated description")]
    pub description: String,
    /// Replaces every question when present
    #[validate(nested)]
    pub questions: Option<Vec<NewQuestion>>,
}

/// Public quiz reads
pub fn public_quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quizzes))
        .route("/:id", get(get_quiz))
}

/// Quiz writes that need a bearer token
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quiz))
        .route("/:id", put(update_quiz).delete(delete_quiz))
}

/// List quizzes with their questions
#[utoipa::path(
    get,
    path = "/api/quiz",
    tag = "Quizzes",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of quizzes", body = PaginatedQuizzes)
    )
)]
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Quiz>>> {
    let page = state.quiz_service.list_quizzes(params).await?;
    Ok(Json(page))
}

/// Get quiz by ID
#[utoipa::path(
    get,
    path = "/api/quiz/{id}",
    tag = "Quizzes",
    params(
        ("id" = i32, Path, description = "Quiz ID")
    ),
    responses(
        (status = 200, description = "Quiz with questions", body = Quiz),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Quiz>> {
    let quiz = state.quiz_service.get_quiz(id).await?;
    Ok(Json(quiz))
}

/// Create a quiz owned by the caller
#[utoipa::path(
    post,
    path = "/api/quiz",
    tag = "Quizzes",
    security(("bearer_auth" = [])),
    request_body = CreateQuizRequest,
    responses(
        (status = 201, description = "Quiz created, wrapped as {success, data, message}", body = Quiz),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_quiz(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateQuizRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Quiz>>)> {
    let quiz = state
        .quiz_service
        .create_quiz(NewQuiz {
            user_id: current_user.id,
            title: payload.quiz.title,
            description: payload.quiz.description,
            questions: payload.questions,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(quiz, "OK"))))
}

/// Update an owned quiz
#[utoipa::path(
    put,
    path = "/api/quiz/{id}",
    tag = "Quizzes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Quiz ID")
    ),
    request_body = UpdateQuizRequest,
    responses(
        (status = 204, description = "Quiz updated"),
        (status = 400, description = "Validation error or id mismatch"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the quiz owner"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn update_quiz(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateQuizRequest>,
) -> AppResult<NoContent> {
    if payload.id != id {
        return Err(AppError::bad_request("Quiz id in body does not match path"));
    }

    state
        .quiz_service
        .update_quiz(
            current_user.id,
            id,
            UpdateQuiz {
                title: payload.title,
                description: payload.description,
                questions: payload.questions,
            },
        )
        .await?;

    Ok(NoContent)
}

/// Delete an owned quiz
#[utoipa::path(
    delete,
    path = "/api/quiz/{id}",
    tag = "Quizzes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Quiz ID")
    ),
    responses(
        (status = 200, description = "Deleted quiz", body = Quiz),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the quiz owner"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn delete_quiz(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Quiz>> {
    let quiz = state.quiz_service.delete_quiz(current_user.id, id).await?;
    Ok(Json(quiz))
}
