//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use super::entities::{question, quiz, user};
use super::entities::{QuestionEntity, QuizEntity, UserActiveModel, UserEntity};
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact (case-sensitive) email match
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> AppResult<User>;

    /// Update user fields
    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<User>;

    /// Delete user together with their quizzes and questions, returning the deleted user
    async fn delete(&self, id: i32) -> AppResult<User>;

    /// List one page of users ordered by id, with the total count
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map unique-email violations to a conflict instead of a database error
fn map_write_error(err: DbErr, email: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict(format!("Email \"{}\"", email))
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: CreateUser) -> AppResult<User> {
        let (password_hash, password_salt) = new_user.password.into_parts();
        let active_model = UserActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email.clone()),
            password_hash: Set(password_hash),
            password_salt: Set(password_salt),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, &new_user.email))?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let email_for_error = changes
            .email
            .clone()
            .unwrap_or_else(|| existing.email.clone());
        let mut active: UserActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_error(e, &email_for_error))?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<User> {
        let txn = self.db.begin().await?;

        let existing = UserEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let quiz_ids: Vec<i32> = QuizEntity::find()
            .select_only()
            .column(quiz::Column::Id)
            .filter(quiz::Column::UserId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !quiz_ids.is_empty() {
            QuestionEntity::delete_many()
                .filter(question::Column::QuizId.is_in(quiz_ids))
                .exec(&txn)
                .await?;
            QuizEntity::delete_many()
                .filter(quiz::Column::UserId.eq(id))
                .exec(&txn)
                .await?;
        }

        UserEntity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::debug!(user_id = id, "User and owned quizzes deleted");
        Ok(User::from(existing))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let offset = params.offset()?;
        let total = UserEntity::find().count(&self.db).await?;
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(params.limit())
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
