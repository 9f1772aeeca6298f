use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Group granted to every registered account.
pub const USER_GROUP: &str = "user";

/// Calendar token claims.
///
/// Standard RFC 7519 claims plus the identity claims the calendar services
/// rely on. Every field is optional on the wire; consumers call
/// [`Claims::user_id`] and [`Claims::require_group`] once after verification
/// instead of probing claim keys themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user id in string form)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Role groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Explicit user id, redundant with `sub`
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an authenticated account.
    ///
    /// # Arguments
    /// * `user_id` - Storage identifier of the account
    /// * `username` - Account username
    /// * `email` - Account email address
    /// * `issuer` - Identity of the issuing service
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with sub, userId, iss, groups, username, email, iat and exp set
    pub fn for_user(
        user_id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        issuer: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: Some(user_id.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            iss: Some(issuer.into()),
            groups: vec![USER_GROUP.to_string()],
            username: Some(username.into()),
            email: Some(email.into()),
            user_id: Some(user_id.to_string()),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Add a role group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Set the explicit `userId` claim.
    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    /// Extract the caller's user id.
    ///
    /// The explicit `userId` claim wins when present; otherwise the subject is
    /// used. The value must be a positive integer.
    ///
    /// # Errors
    /// * `MissingClaim` - Neither `userId` nor `sub` is present
    /// * `InvalidToken` - The identifier is not a positive integer
    pub fn user_id(&self) -> Result<i64, JwtError> {
        let raw = self
            .user_id
            .as_deref()
            .or(self.sub.as_deref())
            .ok_or_else(|| JwtError::MissingClaim("userId".to_string()))?;

        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(JwtError::InvalidToken(format!(
                "Invalid user identifier: {}",
                raw
            ))),
        }
    }

    /// Check group membership.
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Fail unless the token grants `group`.
    pub fn require_group(&self, group: &str) -> Result<(), JwtError> {
        if self.has_group(group) {
            Ok(())
        } else {
            Err(JwtError::MissingGroup(group.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(42, "alice", "alice@x.com", "calendar-auth", 24);

        assert_eq!(claims.sub, Some("42".to_string()));
        assert_eq!(claims.user_id, Some("42".to_string()));
        assert_eq!(claims.username, Some("alice".to_string()));
        assert_eq!(claims.email, Some("alice@x.com".to_string()));
        assert_eq!(claims.iss, Some("calendar-auth".to_string()));
        assert!(claims.has_group(USER_GROUP));

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 24 * 60 * 60);
    }

    #[test]
    fn test_user_id_prefers_explicit_claim() {
        let claims = Claims::new().with_subject("7").with_user_id("42");
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn test_user_id_falls_back_to_subject() {
        let claims = Claims::new().with_subject("7");
        assert_eq!(claims.user_id().unwrap(), 7);
    }

    #[test]
    fn test_user_id_rejects_non_numeric_and_non_positive() {
        let claims = Claims::new().with_subject("alice");
        assert!(matches!(claims.user_id(), Err(JwtError::InvalidToken(_))));

        let claims = Claims::new().with_user_id("0");
        assert!(matches!(claims.user_id(), Err(JwtError::InvalidToken(_))));

        // a malformed explicit claim is not rescued by a valid subject
        let claims = Claims::new().with_subject("7").with_user_id("-3");
        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_user_id_missing() {
        assert!(matches!(
            Claims::new().user_id(),
            Err(JwtError::MissingClaim(_))
        ));
    }

    #[test]
    fn test_require_group() {
        let claims = Claims::new().with_group("user");
        assert!(claims.require_group(USER_GROUP).is_ok());
        assert!(matches!(
            Claims::new().require_group(USER_GROUP),
            Err(JwtError::MissingGroup(_))
        ));
    }

    #[test]
    fn test_wire_format_uses_user_id_key() {
        let claims = Claims::for_user(5, "bob", "bob@x.com", "calendar-auth", 1);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["userId"], "5");
        assert_eq!(json["groups"][0], "user");
        assert!(json.get("user_id").is_none());
    }
}
