use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::SignupOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::ROLE_USER;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration, login and lookup.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<SignupOutcome, UserError> {
        // Fast path only; the store's uniqueness rule decides under concurrency.
        if self
            .repository
            .exists_by_email(command.email.as_str())
            .await?
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let now = Utc::now();
        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                password_hash,
                display_name: command.display_name,
                is_admin: false,
                status: UserStatus::Active,
                created_at: now,
                updated_at: now,
            })
            .await?;

        let result = self
            .authenticator
            .issue_token(&user.id.to_string(), &[ROLE_USER.to_string()])?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(SignupOutcome {
            user,
            access_token: result.access_token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticationResult, UserError> {
        let user = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self
            .authenticator
            .verify_password(&command.password, &user.password_hash)
        {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        if !user.is_active() {
            tracing::info!(user_id = %user.id, status = %user.status, "Login to disabled account");
            return Err(UserError::AccountDisabled);
        }

        let result = self
            .authenticator
            .issue_token(&user.id.to_string(), &user.roles())?;

        tracing::info!(user_id = %user.id, admin = user.is_admin, "User logged in");

        Ok(result)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
