use thiserror::Error;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::domain::event::models::EventId;

/// Error type for EventId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventIdError {
    #[error("Event id must be a positive integer: {0}")]
    InvalidFormat(String),
}

/// Error type for EventTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventTitleError {
    #[error("Event title is required")]
    Empty,

    #[error("Event title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all event-related operations
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Invalid event ID: {0}")]
    InvalidEventId(#[from] EventIdError),

    #[error("Invalid event title: {0}")]
    InvalidTitle(#[from] EventTitleError),

    #[error("{0}")]
    Validation(String),

    /// Absent and owned-by-someone-else are reported identically.
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// Referenced category is missing or owned by another user.
    #[error("Invalid category")]
    InvalidCategory(CategoryId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<CategoryError> for EventError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::DatabaseError(msg) => EventError::DatabaseError(msg),
            other => EventError::Unknown(other.to_string()),
        }
    }
}
