//! Configuration management for the server.

use library_engine::LibraryConfig;
use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// Lending policy handed to member registration
    pub library: LibraryConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidMaxConnections)?;

        let default_book_quota = parse_book_quota(env::var("DEFAULT_BOOK_QUOTA").ok())?;

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            library: LibraryConfig::new(default_book_quota),
        })
    }
}

/// Parse the quota for new members, falling back to the engine default.
fn parse_book_quota(raw: Option<String>) -> Result<i32, ConfigError> {
    match raw {
        None => Ok(LibraryConfig::DEFAULT_BOOK_QUOTA),
        Some(value) => match value.trim().parse::<i32>() {
            Ok(quota) if quota >= 0 => Ok(quota),
            _ => Err(ConfigError::InvalidBookQuota(value)),
        },
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,

    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid DATABASE_MAX_CONNECTIONS value")]
    InvalidMaxConnections,

    #[error("Invalid DEFAULT_BOOK_QUOTA value: {0:?}")]
    InvalidBookQuota(String),
}
