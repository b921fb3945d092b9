//! User domain entity and related types.

use serde::Serialize;
use utoipa::ToSchema;

use super::Password;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Unique, compared case-sensitively
    pub email: String,
    pub password: Password,
}

impl User {
    pub fn new(id: i32, name: String, email: String, password: Password) -> Self {
        Self {
            id,
            name,
            email,
            password,
        }
    }

    /// Verify a plaintext password against the stored credential.
    pub fn check_password(&self, plain_text: &str) -> crate::errors::AppResult<bool> {
        self.password.verify(plain_text)
    }
}

/// Data needed to persist a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: Password,
}

/// Partial user update
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
