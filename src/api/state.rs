//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, QuizService, ServiceContainer, Services, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Quiz service
    pub quiz_service: Arc<dyn QuizService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            quiz_service: container.quizzes(),
            database,
        }
    }
}
