//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod password;
pub mod quiz;
pub mod user;
pub mod validation;

pub use password::{verify_password, Password};
pub use quiz::{NewQuestion, NewQuiz, Question, Quiz, UpdateQuiz};
pub use user::{CreateUser, UpdateUser, User, UserResponse};
pub use validation::not_blank;
