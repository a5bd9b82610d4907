use async_trait::async_trait;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::SignupOutcome;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first access token.
    ///
    /// # Arguments
    /// * `command` - Validated email, password and display name
    ///
    /// # Returns
    /// Created user together with an access token carrying `["USER"]`
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<SignupOutcome, UserError>;

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AccountDisabled` - Credentials match but the account is not active
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<auth::AuthenticationResult, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Data access for the credential store.
///
/// Implementations must enforce email uniqueness themselves: `create` is
/// the final arbiter for concurrent registrations of the same address.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and assign its identity.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Check whether an email address is already registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;
}
