//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits reached
//! through the Unit of Work.

mod auth_service;
pub mod container;
mod quiz_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims};
pub use quiz_service::{QuizManager, QuizService};
pub use user_service::{UserManager, UserService};
