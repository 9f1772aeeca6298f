use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Claims written into every issued token.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub issuer: String,
    pub expiration_hours: i64,
}

/// Domain service for registration and login.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    token_settings: TokenSettings,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    /// * `token_settings` - Issuer and lifetime of issued tokens
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        token_settings: TokenSettings,
    ) -> Self {
        Self {
            repository,
            authenticator,
            token_settings,
        }
    }

    fn claims_for(&self, user: &User) -> Claims {
        Claims::for_user(
            user.id.0,
            user.username.as_str(),
            user.email.as_str(),
            self.token_settings.issuer.as_str(),
            self.token_settings.expiration_hours,
        )
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        // Fast path for a clean message; the unique constraints decide races.
        if self
            .repository
            .exists_by_username(&command.username)
            .await?
        {
            return Err(AuthError::DuplicateUsername(command.username.to_string()));
        }
        if self.repository.exists_by_email(&command.email).await? {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        tracing::debug!(username = %command.username, "Registering new user");

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<String, AuthError> {
        tracing::debug!(username = %command.username, "Authentication attempt");

        let user = match self.repository.find_by_username(&command.username).await? {
            Some(user) => user,
            None => {
                tracing::debug!(username = %command.username, "Authentication failed");
                return Err(self.authenticator.reject(command.password.as_str()).into());
            }
        };

        let claims = self.claims_for(&user);
        let result = self
            .authenticator
            .authenticate(command.password.as_str(), &user.password_hash, &claims)
            .map_err(|e| {
                tracing::debug!(username = %command.username, error = %e, "Authentication failed");
                AuthError::from(e)
            })?;

        tracing::debug!(user_id = %user.id, "Authentication successful");

        Ok(result.access_token)
    }
}
