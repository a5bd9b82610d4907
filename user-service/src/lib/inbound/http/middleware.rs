use auth::AuthenticatedPrincipal;
use auth::Authenticator;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Literal prefix of a bearer credential in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Authentication state of a single request.
///
/// Inserted into the request extensions by [`authenticate`] and read by
/// handlers through [`Authenticated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    Anonymous,
    Authenticated(AuthenticatedPrincipal),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A bearer token was presented and failed verification.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Anything else that went wrong while inspecting the request.
    #[error("Unexpected authentication failure: {0}")]
    Unexpected(String),
}

/// Middleware establishing the [`AuthContext`] of every request.
///
/// Missing or non-bearer credentials pass through as anonymous. A bearer
/// token that fails verification ends the request with 401. Unexpected
/// failures are logged and the request continues anonymously.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = match resolve_auth_context(req.headers(), &state.authenticator) {
        Ok(context) => context,
        Err(GateError::InvalidToken(reason)) => {
            tracing::warn!(reason = %reason, "JWT validation failed");
            return Err(ApiError::invalid_token());
        }
        Err(GateError::Unexpected(reason)) => {
            tracing::error!(reason = %reason, "Authentication gate error, continuing unauthenticated");
            AuthContext::Anonymous
        }
    };

    if let AuthContext::Authenticated(principal) = &context {
        tracing::debug!(
            subject = principal.subject_id(),
            authorities = ?principal.authorities(),
            "JWT authentication succeeded"
        );
    }

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Decide the authentication state for a set of request headers.
///
/// # Errors
/// * `InvalidToken` - Bearer token present but expired, forged or malformed
/// * `Unexpected` - Header unreadable or verification backend failure
pub fn resolve_auth_context(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthContext, GateError> {
    let Some(token) = extract_bearer_token(headers)? else {
        return Ok(AuthContext::Anonymous);
    };

    match authenticator.verify_token(token) {
        Ok(principal) => Ok(AuthContext::Authenticated(principal)),
        Err(e) if e.is_token_rejection() => Err(GateError::InvalidToken(e.to_string())),
        Err(e) => Err(GateError::Unexpected(e.to_string())),
    }
}

/// Token part of a `Bearer` authorization header, if there is one.
///
/// # Errors
/// * `Unexpected` - Header contains bytes that are not visible ASCII
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<&str>, GateError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|e| GateError::Unexpected(format!("Unreadable Authorization header: {}", e)))?;

    Ok(value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.trim().is_empty()))
}

/// Extractor for routes that require an authenticated caller.
///
/// Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext::Authenticated(principal)) => Ok(Authenticated(principal.clone())),
            _ => Err(ApiError::authentication_required()),
        }
    }
}
