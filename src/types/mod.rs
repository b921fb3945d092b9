//! Shared types for handlers and services.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedQuizzes, PaginatedUsers, PaginationMeta, PaginationParams};
pub use response::{ApiResponse, NoContent};
