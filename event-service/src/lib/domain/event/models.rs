use std::fmt;

use chrono::NaiveDateTime;

use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::event::errors::EventIdError;
use crate::domain::event::errors::EventTitleError;
use crate::domain::user::models::UserId;

/// Event unique identifier value object.
///
/// Assigned by storage; always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub i64);

impl EventId {
    /// Parse an event ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, EventIdError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(EventIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Calendar entry owned by a single user.
///
/// Timestamps are local date-times without a zone. When `category` is set
/// it is owned by the same user as the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: EventTitle,
    pub description: Option<String>,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: Option<NaiveDateTime>,
    pub user_id: UserId,
    pub category: Option<Category>,
}

/// Event about to be persisted; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: EventTitle,
    pub description: Option<String>,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: Option<NaiveDateTime>,
    pub user_id: UserId,
    pub category: Option<Category>,
}

impl NewEvent {
    /// Attach the storage-assigned id.
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start_date_time: self.start_date_time,
            end_date_time: self.end_date_time,
            user_id: self.user_id,
            category: self.category,
        }
    }
}

/// Event title value object.
///
/// Ensures title is non-blank and within 255 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTitle(String);

impl EventTitle {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - Title exceeds 255 characters
    pub fn new(title: String) -> Result<Self, EventTitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(EventTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(EventTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Inclusive window on an event's start time.
///
/// Only the start timestamp is compared; an event that starts before the
/// window and runs into it is not matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Validated fields written by create and update.
///
/// `category_id` of `None` means "no category": on update it clears any
/// existing reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCommand {
    pub title: EventTitle,
    pub description: Option<String>,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: Option<NaiveDateTime>,
    pub category_id: Option<CategoryId>,
}
