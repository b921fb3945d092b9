//! Quiz service - CRUD over quizzes with owner checks on writes.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewQuiz, Quiz, UpdateQuiz};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Quiz service trait for dependency injection.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// List one page of quizzes with their questions
    async fn list_quizzes(&self, params: PaginationParams) -> AppResult<Paginated<Quiz>>;

    /// Get a single quiz with its questions
    async fn get_quiz(&self, id: i32) -> AppResult<Quiz>;

    /// Create a quiz owned by `quiz.user_id`
    async fn create_quiz(&self, quiz: NewQuiz) -> AppResult<Quiz>;

    /// Update a quiz the actor owns
    async fn update_quiz(&self, actor_id: i32, id: i32, changes: UpdateQuiz) -> AppResult<Quiz>;

    /// Delete a quiz the actor owns, returning it
    async fn delete_quiz(&self, actor_id: i32, id: i32) -> AppResult<Quiz>;
}

/// Concrete implementation of QuizService using Unit of Work.
pub struct QuizManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> QuizManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load the quiz and make sure `actor_id` owns it.
    async fn owned_quiz(&self, actor_id: i32, id: i32) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        if !quiz.is_owned_by(actor_id) {
            tracing::warn!(actor_id, quiz_id = id, "Rejected change to another user's quiz");
            return Err(AppError::Forbidden);
        }
        Ok(quiz)
    }
}

#[async_trait]
impl<U: UnitOfWork> QuizService for QuizManager<U> {
    async fn list_quizzes(&self, params: PaginationParams) -> AppResult<Paginated<Quiz>> {
        let (quizzes, total) = self.uow.quizzes().list(&params).await?;
        Ok(Paginated::new(quizzes, &params, total))
    }

    async fn get_quiz(&self, id: i32) -> AppResult<Quiz> {
        self.uow.quizzes().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_quiz(&self, quiz: NewQuiz) -> AppResult<Quiz> {
        // The owner may have been deleted after the token was issued.
        self.uow
            .users()
            .find_by_id(quiz.user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let created = self.uow.quizzes().create(quiz).await?;
        tracing::info!(
            quiz_id = created.id,
            user_id = created.user_id,
            questions = created.questions.len(),
            "Quiz created"
        );
        Ok(created)
    }

    async fn update_quiz(&self, actor_id: i32, id: i32, changes: UpdateQuiz) -> AppResult<Quiz> {
        self.owned_quiz(actor_id, id).await?;

        let updated = self.uow.quizzes().update(id, changes).await?;
        tracing::info!(quiz_id = id, "Quiz updated");
        Ok(updated)
    }

    async fn delete_quiz(&self, actor_id: i32, id: i32) -> AppResult<Quiz> {
        self.owned_quiz(actor_id, id).await?;

        let deleted = self.uow.quizzes().delete(id).await?;
        tracing::info!(quiz_id = id, "Quiz deleted");
        Ok(deleted)
    }
}
