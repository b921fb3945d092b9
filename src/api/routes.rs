//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, public_quiz_routes, public_user_routes, quiz_routes, user_routes};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api/users",
            auth_routes()
                .merge(public_user_routes())
                .merge(user_routes().route_layer(require_auth.clone())),
        )
        .nest(
            "/api/quiz",
            public_quiz_routes().merge(quiz_routes().route_layer(require_auth)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Quiz API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, response) = match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: ServiceStatus {
                    status: "healthy",
                    error: None,
                },
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse {
                    status: "degraded",
                    database: ServiceStatus {
                        status: "unhealthy",
                        error: Some(e.to_string()),
                    },
                },
            )
        }
    };

    (status_code, Json(response))
}
