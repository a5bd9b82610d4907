use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues and verifies signed, time-bounded access tokens.
///
/// Tokens are HS512 JWTs over a process-wide secret. Only HS512 is accepted
/// on the way back in: the `alg` header is compared against that single
/// allowlisted algorithm and never used to pick a verifier. Rotating the
/// secret invalidates every outstanding token.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes)
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// TokenService configured with HS512
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
            ttl,
        }
    }

    /// Issue a token for `subject` with `roles`, valid from now for the TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, roles: &[String]) -> Result<String, JwtError> {
        self.issue_at(subject, roles, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or the expiry overflows
    pub fn issue_at(
        &self,
        subject: &str,
        roles: &[String],
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, roles.iter().cloned(), issued_at, self.ttl)?;
        self.encode(&claims)
    }

    /// Sign arbitrary claims with the service key.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature, structure and expiry in one step.
    ///
    /// Subject and roles are only ever handed out from this call (or the
    /// explicitly expiry-blind extractors below), so a caller cannot read
    /// claims that it has not verified.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Bad signature or disallowed algorithm
    /// * `DecodingFailed` - Token is structurally malformed
    /// * `Internal` - Signing backend failed
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_with(token, self.validation(true))
    }

    /// Boolean form of [`TokenService::verify`].
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }

    /// Subject of a correctly signed token.
    ///
    /// Does NOT check expiry. Never base a trust decision on this alone;
    /// use [`TokenService::verify`] instead.
    pub fn extract_subject(&self, token: &str) -> Option<String> {
        self.decode_with(token, self.validation(false))
            .ok()
            .map(|claims| claims.sub)
    }

    /// Roles of a correctly signed token, empty on any failure.
    ///
    /// Does NOT check expiry.
    pub fn extract_roles(&self, token: &str) -> Vec<String> {
        self.decode_with(token, self.validation(false))
            .map(|claims| claims.roles)
            .unwrap_or_default()
    }

    /// True when the token cannot be verified or its `exp` has passed.
    pub fn is_expired(&self, token: &str) -> bool {
        match self.decode_with(token, self.validation(false)) {
            Ok(claims) => claims.is_expired(Utc::now().timestamp()),
            Err(_) => true,
        }
    }

    fn validation(&self, check_expiry: bool) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = vec![self.algorithm];
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_exp = check_expiry;
        validation.leeway = 0;
        validation
    }

    fn decode_with(&self, token: &str, validation: Validation) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::MissingRequiredClaim(_) => JwtError::InvalidToken(e.to_string()),
                ErrorKind::Crypto(_) => JwtError::Internal(e.to_string()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })
    }
}
