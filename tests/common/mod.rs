//! Shared harness for integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations
//! applied, so tests never share state.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use serde_json::{json, Value};
use tower::ServiceExt;

use quiz_api::api::{create_router, AppState};
use quiz_api::config::Config;
use quiz_api::infra::Database;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Fresh in-memory database with all migrations applied.
///
/// The pool is capped at one connection because every SQLite
/// in-memory connection is a separate database.
pub async fn test_database() -> Arc<Database> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn: DatabaseConnection = SeaDatabase::connect(opts)
        .await
        .expect("in-memory sqlite should connect");
    let db = Database::from_connection(conn);
    db.run_migrations().await.expect("migrations should apply");

    Arc::new(db)
}

pub fn test_config() -> Config {
    Config::new("sqlite::memory:", JWT_SECRET).expect("test secret is long enough")
}

/// Router over a real database, driven with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub database: Arc<Database>,
}

impl TestApp {
    pub async fn new() -> Self {
        let database = test_database().await;
        let state = AppState::from_config(database.clone(), test_config());

        Self {
            router: create_router(state),
            database,
        }
    }

    /// Send a request and return the status with the body parsed as JSON.
    ///
    /// Empty bodies become `Value::Null`, non-JSON bodies a `Value::String`.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    /// Register a user and return their id.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/api/users/register",
                None,
                Some(json!({ "name": name, "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        body["id"].as_i64().expect("id in response") as i32
    }

    /// Authenticate and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/users/authenticate",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "authenticate failed: {}", body);

        body["token"].as_str().expect("token in response").to_string()
    }

    /// Register and authenticate in one go.
    pub async fn signup(&self, name: &str, email: &str) -> (i32, String) {
        let id = self.register(name, email, "secret123").await;
        let token = self.login(email, "secret123").await;
        (id, token)
    }

    /// Create a quiz and return its id.
    pub async fn create_quiz(&self, token: &str, title: &str, questions: Vec<Value>) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/api/quiz",
                Some(token),
                Some(json!({
                    "quiz": { "title": title, "description": "A quiz" },
                    "questions": questions,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create quiz failed: {}", body);

        body["data"]["id"].as_i64().expect("quiz id in response") as i32
    }
}

pub fn question(text: &str, answer: &str) -> Value {
    json!({
        "question_text": text,
        "correct_answer": answer,
        "alternative_one": answer,
        "alternative_two": "Oslo",
        "alternative_three": "Helsinki",
        "alternative_four": "Copenhagen",
    })
}
