//! Authentication service - registration, credential checks and token issuance.
//!
//! Two failure channels are kept apart on purpose: malformed input or
//! corrupt stored credentials are `Err`, while an unknown email or a wrong
//! password is `Ok(None)` from [`AuthService::authenticate`]. Callers
//! cannot tell the two soft failures apart.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{
    Config, PASSWORD_HASH_LEN, PASSWORD_SALT_LEN, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use crate::domain::password::is_blank;
use crate::domain::{verify_password, CreateUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a decimal string
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Numeric user id carried in the subject claim
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// Response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Signed JWT bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 604800)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user after checking the email is free
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User>;

    /// Look up a user by exact email and check the password.
    ///
    /// Returns `Ok(None)` for blank input, unknown email or wrong password.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>>;

    /// Issue a signed token whose subject is the user's id
    fn issue_token(&self, user: &User) -> AppResult<String>;

    /// Authenticate and issue a token, failing with `InvalidCredentials`
    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
///
/// The signing secret comes in through `config` and never changes afterwards.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User> {
        if is_blank(&password) {
            return Err(AppError::validation("Password is required"));
        }

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(format!("Email \"{}\"", email)));
        }

        let password = Password::hash(&password)?;
        let user = self
            .uow
            .users()
            .create(CreateUser {
                name,
                email,
                password,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        if is_blank(email) || is_blank(password) {
            return Ok(None);
        }

        let Some(user) = self.uow.users().find_by_email(email).await? else {
            // Same amount of hashing work as a real check, so a missing
            // email is not observable through response time.
            verify_password(password, &[0u8; PASSWORD_HASH_LEN], &[0u8; PASSWORD_SALT_LEN])?;
            return Ok(None);
        };

        if user.check_password(password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;
        Ok(token)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let Some(user) = self.authenticate(&email, &password).await? else {
            tracing::info!("Authentication failed");
            return Err(AppError::InvalidCredentials);
        };

        let token = self.issue_token(&user)?;
        tracing::debug!(user_id = user.id, "Token issued");

        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockQuizRepository, MockUserRepository, QuizRepository, UserRepository};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

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

    fn service(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            user_repo: Arc::new(repo),
            quiz_repo: Arc::new(MockQuizRepository::new()),
        };
        Authenticator::new(Arc::new(uow), Config::new("sqlite::memory:", SECRET).unwrap())
    }

    fn stored_user(password: &str) -> User {
        User::new(
            42,
            "Ada".to_string(),
            "a@b.com".to_string(),
            Password::hash(password).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = stored_user("secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repo).authenticate("a@b.com", "secret123").await;
        assert_eq!(result.unwrap().unwrap().id, 42);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password_is_none() {
        let user = stored_user("secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repo).authenticate("a@b.com", "wrong").await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_is_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repo).authenticate("nobody@b.com", "secret123").await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_blank_input_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(0);

        let svc = service(repo);
        assert!(svc.authenticate("a@b.com", "").await.unwrap().is_none());
        assert!(svc.authenticate("a@b.com", "   ").await.unwrap().is_none());
        assert!(svc.authenticate("", "secret123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_credentials_is_error() {
        let mut user = stored_user("secret123");
        user.password = Password::from_parts(vec![0u8; 10], vec![0u8; 128]);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repo).authenticate("a@b.com", "secret123").await;
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_login_failure_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repo)
            .login("a@b.com".to_string(), "secret123".to_string())
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_returns_verifiable_token() {
        let user = stored_user("secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(repo);
        let response = svc
            .login("a@b.com".to_string(), "secret123".to_string())
            .await
            .unwrap();

        assert_eq!(response.id, 42);
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 7 * 24 * 3600);
        assert_eq!(response.token.split('.').count(), 3);

        let claims = svc.verify_token(&response.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn test_issue_token_expires_in_seven_days() {
        let svc = service(MockUserRepository::new());
        let token = svc.issue_token(&stored_user("secret123")).unwrap();

        let claims = svc.verify_token(&token).unwrap();
        let lifetime = claims.exp - claims.iat;
        assert_eq!(claims.sub, "42");
        assert_eq!(lifetime, 7 * 24 * 3600);
        assert!((claims.iat - Utc::now().timestamp()).abs() < 5);
    }

    #[test]
    fn test_verify_token_rejects_other_secret() {
        let svc = service(MockUserRepository::new());
        let token = svc.issue_token(&stored_user("secret123")).unwrap();

        let other = Authenticator::new(
            Arc::new(TestUnitOfWork {
                user_repo: Arc::new(MockUserRepository::new()),
                quiz_repo: Arc::new(MockQuizRepository::new()),
            }),
            Config::new("sqlite::memory:", "another-secret-key-that-is-32-chars-long").unwrap(),
        );
        assert!(matches!(other.verify_token(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_verify_token_rejects_expired() {
        let svc = Authenticator::new(
            Arc::new(TestUnitOfWork {
                user_repo: Arc::new(MockUserRepository::new()),
                quiz_repo: Arc::new(MockQuizRepository::new()),
            }),
            Config::new("sqlite::memory:", SECRET)
                .unwrap()
                .with_jwt_expiration_hours(-2),
        );
        let token = svc.issue_token(&stored_user("secret123")).unwrap();

        assert!(matches!(svc.verify_token(&token), Err(AppError::Jwt(_))));
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let existing = stored_user("secret123");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().times(0);

        let result = service(repo)
            .register("Ada".to_string(), "a@b.com".to_string(), "secret123".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_blank_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(0);

        let result = service(repo)
            .register("Ada".to_string(), "a@b.com".to_string(), "  ".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|new_user| {
            assert_eq!(new_user.password.hash_bytes().len(), PASSWORD_HASH_LEN);
            assert_eq!(new_user.password.salt_bytes().len(), PASSWORD_SALT_LEN);
            Ok(User::new(1, new_user.name, new_user.email, new_user.password))
        });

        let user = service(repo)
            .register("Ada".to_string(), "a@b.com".to_string(), "secret123".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert!(user.check_password("secret123").unwrap());
    }
}
