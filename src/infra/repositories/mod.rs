//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod quiz_repository;
mod user_repository;

pub use quiz_repository::{QuizRepository, QuizStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use quiz_repository::MockQuizRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
