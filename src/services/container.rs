//! Service Container - Centralized service access.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator, QuizManager, QuizService, UserManager, UserService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get quiz service
    fn quizzes(&self) -> Arc<dyn QuizService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    quiz_service: Arc<dyn QuizService>,
}

impl Services {
    /// Create service container from database connection and config.
    ///
    /// All services share one [`Persistence`] over the same pool.
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            quiz_service: Arc::new(QuizManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn quizzes(&self) -> Arc<dyn QuizService> {
        self.quiz_service.clone()
    }
}
