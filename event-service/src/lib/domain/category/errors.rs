use thiserror::Error;

use crate::domain::category::models::CategoryId;

/// Error type for CategoryId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryIdError {
    #[error("Category id must be a positive integer: {0}")]
    InvalidFormat(String),
}

/// Error type for CategoryName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryNameError {
    #[error("Category name is required")]
    Empty,

    #[error("Category name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for CategoryColor validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryColorError {
    #[error("Category color too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all category-related operations
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Invalid category ID: {0}")]
    InvalidCategoryId(#[from] CategoryIdError),

    #[error("Invalid category name: {0}")]
    InvalidCategoryName(#[from] CategoryNameError),

    #[error("Invalid category color: {0}")]
    InvalidCategoryColor(#[from] CategoryColorError),

    /// Absent and owned-by-someone-else are reported identically.
    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    #[error("Category with name '{0}' already exists")]
    DuplicateCategory(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
