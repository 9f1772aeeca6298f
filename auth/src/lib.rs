//! Authentication utilities shared by the calendar services
//!
//! - Password hashing (Argon2id)
//! - Calendar token claims with identity extraction
//! - JWT token generation and validation (HS256, issuer checked, `exp` required)
//! - Authentication coordination
//!
//! The auth service issues tokens; the event service and the gateway only
//! verify them with the same secret and issuer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, USER_GROUP};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", "calendar-auth");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_user(1, "alice", "alice@example.com", "calendar-auth", 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Downstream: verify, check the role, extract identity
//! let decoded = auth.authorize(&result.access_token, USER_GROUP).unwrap();
//! assert_eq!(decoded.user_id().unwrap(), 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::USER_GROUP;
pub use password::PasswordError;
pub use password::PasswordHasher;
