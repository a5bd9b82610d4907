pub mod claims;
pub mod errors;
pub mod token_service;

pub use claims::Claims;
pub use errors::JwtError;
pub use token_service::TokenService;
