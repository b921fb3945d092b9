//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::{Quiz, UserResponse};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters (reusable across all list endpoints)
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (capped at 100)
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Zero-based page index for the database paginator
    pub fn page_index(&self) -> u64 {
        self.page.max(1) - 1
    }

    /// Row offset for the database query.
    ///
    /// Pages whose offset does not fit a signed 64-bit integer are rejected.
    pub fn offset(&self) -> AppResult<u64> {
        self.page_index()
            .checked_mul(self.limit())
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or_else(|| AppError::bad_request("Page number is out of range"))
    }

    /// Get limit capped at maximum (and at least 1)
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
#[aliases(PaginatedUsers = Paginated<UserResponse>, PaginatedQuizzes = Paginated<Quiz>)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        let per_page = params.limit();
        let total_pages = total.div_ceil(per_page);

        Self {
            data,
            meta: PaginationMeta {
                page: params.page_index() + 1,
                per_page,
                total,
                total_pages,
            },
        }
    }

    /// Convert every item while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
