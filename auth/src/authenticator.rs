use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// One instance is built at start-up from the shared secret and the issuer
/// identity, then shared behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing and verification
    /// * `issuer` - Issuer written into and required from every token
    pub fn new(jwt_secret: &[u8], issuer: &str) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret).with_issuer(issuer),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - JWT claims to encode in token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Fail an authentication attempt for an unknown account.
    ///
    /// Spends a hashing cost comparable to [`Authenticator::authenticate`]
    /// (a hash rather than a verify, so close but not identical) and always
    /// returns `InvalidCredentials`.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        self.password_hasher.reject(password);
        AuthenticationError::InvalidCredentials
    }

    /// Generate JWT token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode a calendar token.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiration or issuer check failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate a token and require a role group.
    ///
    /// # Errors
    /// * `JwtError` - Token invalid, or `MissingGroup` when the group is absent
    pub fn authorize(&self, token: &str, group: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        claims.require_group(group)?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::USER_GROUP;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET, "calendar-auth");

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claims = Claims::for_user(12, "alice", "alice@x.com", "calendar-auth", 24);
        let result = authenticator
            .authenticate(password, &hash, &claims)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.user_id().unwrap(), 12);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET, "calendar-auth");

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let claims = Claims::for_user(12, "alice", "alice@x.com", "calendar-auth", 24);

        let result = authenticator.authenticate("wrong_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_reject_is_invalid_credentials() {
        let authenticator = Authenticator::new(SECRET, "calendar-auth");
        assert!(matches!(
            authenticator.reject("whatever"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_authorize_requires_group() {
        let authenticator = Authenticator::new(SECRET, "calendar-auth");

        let granted = Claims::for_user(3, "carol", "carol@x.com", "calendar-auth", 1);
        let token = authenticator.generate_token(&granted).unwrap();
        assert!(authenticator.authorize(&token, USER_GROUP).is_ok());

        let mut stripped = granted.clone();
        stripped.groups.clear();
        let token = authenticator.generate_token(&stripped).unwrap();
        assert!(matches!(
            authenticator.authorize(&token, USER_GROUP),
            Err(JwtError::MissingGroup(_))
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET, "calendar-auth");

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
