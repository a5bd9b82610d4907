use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::principal::AuthenticatedPrincipal;

/// Authentication coordinator combining password hashing and token handling.
///
/// Built once at startup from the process-wide secret and shared read-only
/// between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued access tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(jwt_secret, token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash. Fails closed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access token for an already authenticated subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        roles: &[String],
    ) -> Result<AuthenticationResult, JwtError> {
        let access_token = self.token_service.issue(subject, roles)?;
        Ok(AuthenticationResult { access_token })
    }

    /// Verify an access token and resolve the principal it names.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, forged, malformed or unverifiable
    pub fn verify_token(&self, token: &str) -> Result<AuthenticatedPrincipal, JwtError> {
        self.token_service
            .verify(token)
            .map(AuthenticatedPrincipal::from)
    }

    /// Underlying token service.
    pub fn tokens(&self) -> &TokenService {
        &self.token_service
    }
}
