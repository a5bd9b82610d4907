use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    /// Signing backend failure unrelated to the token contents.
    #[error("Token backend failure: {0}")]
    Internal(String),
}

impl JwtError {
    /// Whether the error describes the token itself rather than the service.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            JwtError::DecodingFailed(_) | JwtError::TokenExpired | JwtError::InvalidToken(_)
        )
    }
}
