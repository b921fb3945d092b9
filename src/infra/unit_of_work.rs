//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait instead of concrete stores, so tests can
//! swap in mock repositories. Multi-row writes open their own transaction
//! inside the repository that owns them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{QuizRepository, QuizStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get quiz repository
    fn quizzes(&self) -> Arc<dyn QuizRepository>;
}

/// Concrete implementation of UnitOfWork backed by one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    quiz_repo: Arc<QuizStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            quiz_repo: Arc::new(QuizStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn quizzes(&self) -> Arc<dyn QuizRepository> {
        self.quiz_repo.clone()
    }
}
