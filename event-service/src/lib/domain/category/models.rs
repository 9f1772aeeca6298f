use std::fmt;

use crate::domain::category::errors::CategoryColorError;
use crate::domain::category::errors::CategoryIdError;
use crate::domain::category::errors::CategoryNameError;
use crate::domain::user::models::UserId;

/// Category unique identifier value object.
///
/// Assigned by storage; always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(pub i64);

impl CategoryId {
    /// Parse a category ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, CategoryIdError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(CategoryIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User-defined label for grouping events.
///
/// Names are unique per owner, not globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub color: Option<CategoryColor>,
    pub user_id: UserId,
}

/// Category about to be persisted; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub color: Option<CategoryColor>,
    pub user_id: UserId,
}

impl NewCategory {
    /// Attach the storage-assigned id.
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            color: self.color,
            user_id: self.user_id,
        }
    }
}

/// Category name value object.
///
/// Ensures name is non-blank and within 100 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated category name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, CategoryNameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(CategoryNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CategoryNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display color, kept as the client sent it (e.g. `#f00`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColor(String);

impl CategoryColor {
    const MAX_LENGTH: usize = 32;

    /// # Errors
    /// * `TooLong` - Color exceeds 32 characters
    pub fn new(color: String) -> Result<Self, CategoryColorError> {
        let length = color.chars().count();
        if length > Self::MAX_LENGTH {
            Err(CategoryColorError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(color))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated fields written by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCommand {
    pub name: CategoryName,
    pub color: Option<CategoryColor>,
}
