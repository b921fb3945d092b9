//! User service - Handles user-related business logic.
//!
//! Accounts can only be changed or removed by their owner.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List one page of users
    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>>;

    /// Update name and/or email of the caller's own account
    async fn update_user(&self, actor_id: i32, id: i32, changes: UpdateUser) -> AppResult<User>;

    /// Delete the caller's own account together with their quizzes
    async fn delete_user(&self, actor_id: i32, id: i32) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn ensure_self(actor_id: i32, id: i32) -> AppResult<()> {
    if actor_id != id {
        tracing::warn!(actor_id, target_id = id, "Rejected change to another user's account");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>> {
        let (users, total) = self.uow.users().list(&params).await?;
        Ok(Paginated::new(users, &params, total))
    }

    async fn update_user(&self, actor_id: i32, id: i32, changes: UpdateUser) -> AppResult<User> {
        ensure_self(actor_id, id)?;

        let current = self.get_user(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }

        if let Some(email) = changes.email.as_deref() {
            if email != current.email && self.uow.users().find_by_email(email).await?.is_some() {
                return Err(AppError::conflict(format!("Email \"{}\"", email)));
            }
        }

        self.uow.users().update(id, changes).await
    }

    async fn delete_user(&self, actor_id: i32, id: i32) -> AppResult<User> {
        ensure_self(actor_id, id)?;

        let deleted = self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Password;
    use crate::infra::{MockQuizRepository, MockUserRepository, QuizRepository, UserRepository};
    use mockall::predicate::eq;

    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
        quiz_repo: Arc<MockQuizRepository>,
    }

    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        fn quizzes(&self) -> Arc<dyn QuizRepository> {
            self.quiz_repo.clone()
        }
    }

    fn service(repo: MockUserRepository) -> UserManager<TestUnitOfWork> {
        UserManager::new(Arc::new(TestUnitOfWork {
            user_repo: Arc::new(repo),
            quiz_repo: Arc::new(MockQuizRepository::new()),
        }))
    }

    fn user(id: i32, email: &str) -> User {
        User::new(
            id,
            "Ada".to_string(),
            email.to_string(),
            Password::from_parts(vec![1; 64], vec![2; 128]),
        )
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));

        let result = service(repo).get_user(9).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_users_builds_page_meta() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|_| Ok((vec![user(1, "a@b.com"), user(2, "c@d.com")], 5)));

        let page = service(repo)
            .list_users(PaginationParams::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn test_update_other_user_forbidden() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(0);
        repo.expect_update().times(0);

        let result = service(repo)
            .update_user(1, 2, UpdateUser::default())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_email_taken_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "a@b.com"))));
        repo.expect_find_by_email()
            .withf(|email| email == "c@d.com")
            .returning(|_| Ok(Some(user(2, "c@d.com"))));
        repo.expect_update().times(0);

        let changes = UpdateUser {
            name: None,
            email: Some("c@d.com".to_string()),
        };
        let result = service(repo).update_user(1, 1, changes).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_same_email_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "a@b.com"))));
        repo.expect_find_by_email().times(0);
        repo.expect_update().times(1).returning(|id, changes| {
            let mut updated = user(id, "a@b.com");
            updated.name = changes.name.unwrap_or(updated.name);
            Ok(updated)
        });

        let changes = UpdateUser {
            name: Some("Grace".to_string()),
            email: Some("a@b.com".to_string()),
        };
        let updated = service(repo).update_user(1, 1, changes).await.unwrap();
        assert_eq!(updated.name, "Grace");
    }

    #[tokio::test]
    async fn test_delete_self() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(3))
            .times(1)
            .returning(|id| Ok(user(id, "a@b.com")));

        let deleted = service(repo).delete_user(3, 3).await.unwrap();
        assert_eq!(deleted.id, 3);
    }

    #[tokio::test]
    async fn test_delete_other_user_forbidden() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().times(0);

        let result = service(repo).delete_user(3, 4).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
