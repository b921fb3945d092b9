//! Quiz API - REST service for creating and sharing multiple-choice quizzes.
//!
//! Users register, authenticate with email and password, and receive a
//! signed bearer token. Quizzes are public to read; only their owner can
//! change or delete them.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve` and `migrate` entry points
//! - **config**: Environment configuration and constants
//! - **domain**: Users, credentials, quizzes and questions
//! - **services**: Authentication, user and quiz use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Pagination and response wrappers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Quiz, User};
pub use errors::{AppError, AppResult};
