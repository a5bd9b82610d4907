//! Authentication utilities library
//!
//! Provides the authentication core of the user service:
//! - Password hashing (Argon2id)
//! - JWT access token issuance and verification (HS512)
//! - Authenticated principals and their authorization tags
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = tokens.issue("42", &["USER".to_string()]).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! assert!(auth.verify_password("password123", &hash));
//! let result = auth.issue_token("42", &["USER".to_string()]).unwrap();
//!
//! // Request: resolve the principal
//! let principal = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(principal.authorities(), vec!["ROLE_USER".to_string()]);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod principal;

// Re-export commonly used items
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::AuthenticatedPrincipal;
