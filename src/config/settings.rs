//! Application settings loaded from environment variables.

use std::env;

use thiserror::Error;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Development-only signing secret used when `JWT_SECRET` is unset in debug builds.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Configuration loading errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set in production")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {} characters long", MIN_JWT_SECRET_LENGTH)]
    JwtSecretTooShort,

    #[error("JWT_EXPIRATION_HOURS must be a positive number of hours")]
    InvalidExpiration,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Build a configuration with an explicit database URL and signing secret.
    ///
    /// Everything else uses defaults.
    pub fn new(
        database_url: impl Into<String>,
        jwt_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        validate_secret(&jwt_secret)?;

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        })
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// The signing secret is read once here and never changes for the
    /// lifetime of the process.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::MissingJwtSecret),
        };
        validate_secret(&jwt_secret)?;

        let jwt_expiration_hours = match env::var("JWT_EXPIRATION_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(ConfigError::InvalidExpiration)?,
            Err(_) => DEFAULT_JWT_EXPIRATION_HOURS,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }

    /// Override the token lifetime.
    pub fn with_jwt_expiration_hours(mut self, hours: i64) -> Self {
        self.jwt_expiration_hours = hours;
        self
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::JwtSecretTooShort);
    }
    Ok(())
}
