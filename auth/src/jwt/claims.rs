use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::errors::JwtError;

/// Claims carried by an access token.
///
/// `roles` keeps the order it was issued with. Timestamps are Unix seconds
/// as required by RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Granted roles, e.g. `["USER", "ADMIN"]`
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `roles` - Roles granted to the subject
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, roles, iat and exp set
    ///
    /// # Errors
    /// * `EncodingFailed` - `issued_at + ttl` is outside the representable range
    pub fn new<S, R>(
        subject: impl ToString,
        roles: R,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("Token lifetime {} overflows expiry", ttl))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
