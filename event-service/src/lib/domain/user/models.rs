use std::fmt;

use crate::domain::user::errors::UserIdError;

/// Owner of categories and events.
///
/// Accounts live in auth-service; this service only ever sees the id carried
/// by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Build a user ID from a token identity.
    ///
    /// # Errors
    /// * `InvalidFormat` - Value is not positive
    pub fn new(id: i64) -> Result<Self, UserIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(UserIdError::InvalidFormat(id.to_string()))
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
