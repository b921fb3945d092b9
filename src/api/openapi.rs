//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, quiz_handler, user_handler};
use crate::domain::{NewQuestion, Question, Quiz, UserResponse};
use crate::services::AuthResponse;
use crate::types::{PaginatedQuizzes, PaginatedUsers, PaginationMeta};

/// OpenAPI documentation for the Quiz API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quiz API",
        version = "0.1.0",
        description = "Create, share and manage multiple-choice quizzes"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::authenticate,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Quiz endpoints
        quiz_handler::list_quizzes,
        quiz_handler::get_quiz,
        quiz_handler::create_quiz,
        quiz_handler::update_quiz,
        quiz_handler::delete_quiz,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            Quiz,
            Question,
            NewQuestion,
            // Pagination
            PaginatedUsers,
            PaginatedQuizzes,
            PaginationMeta,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::AuthenticateRequest,
            AuthResponse,
            // Request bodies
            user_handler::UpdateUserRequest,
            quiz_handler::QuizFields,
            quiz_handler::CreateQuizRequest,
            quiz_handler::UpdateQuizRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and authentication"),
        (name = "Users", description = "User account operations"),
        (name = "Quizzes", description = "Quiz and question management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/users/authenticate"))
                        .build(),
                ),
            );
        }
    }
}
