use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum length of the token signing secret in bytes.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (one year).
pub const MAX_JWT_EXPIRATION_MS: i64 = 365 * 24 * 60 * 60 * 1000;

/// `database.url` value selecting the in-memory credential store.
pub const IN_MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url == IN_MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_ms: i64,
}

impl JwtConfig {
    /// Lifetime of issued access tokens.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.expiration_ms)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_ms", &self.expiration_ms)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_ms", 86_400_000_i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_JWT_SECRET_BYTES
            )));
        }

        if self.jwt.expiration_ms <= 0 || self.jwt.expiration_ms > MAX_JWT_EXPIRATION_MS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_ms must be between 1 and {}",
                MAX_JWT_EXPIRATION_MS
            )));
        }

        Ok(())
    }
}
