//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to a documented default:
//!
//! - `STORE_DB_HOST` - database host (default: localhost)
//! - `STORE_DB_PORT` - database port (default: 5432)
//! - `STORE_DB_USER` - database user (default: postgres)
//! - `STORE_DB_PASSWORD` - database password (default: empty)
//! - `STORE_DB_NAME` - database name (default: pixelport)
//! - `STORE_HOST` - bind address (default: 127.0.0.1)
//! - `STORE_PORT` - listen port (default: 3000)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

/// `PostgreSQL` connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: SecretString,
    /// Database name.
    pub name: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric or address variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STORE_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STORE_PORT", "3000")?;
        let database = DatabaseConfig::from_env()?;

        Ok(Self {
            database,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: get_env_or_default("STORE_DB_HOST", "localhost"),
            port: parse_env_or_default::<u16>("STORE_DB_PORT", "5432")?,
            user: get_env_or_default("STORE_DB_USER", "postgres"),
            password: SecretString::from(get_env_or_default("STORE_DB_PASSWORD", "")),
            name: get_env_or_default("STORE_DB_NAME", "pixelport"),
        })
    }

    /// Build sqlx connection options from these settings.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default, parsed into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            database: DatabaseConfig {
                host: "db.internal".to_string(),
                port: 5432,
                user: "store".to_string(),
                password: SecretString::from("hunter2"),
                name: "pixelport".to_string(),
            },
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_database_debug_redacts_password() {
        let debug_output = format!("{:?}", test_config().database);
        assert!(debug_output.contains("db.internal"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_parse_env_default_used_when_unset() {
        // Deliberately unset variable name
        let port = parse_env_or_default::<u16>("PIXELPORT_TEST_UNSET_PORT", "5432").unwrap();
        assert_eq!(port, 5432);
    }

    #[test]
    fn test_invalid_env_var_display() {
        let err = ConfigError::InvalidEnvVar("STORE_PORT".to_string(), "bad digit".to_string());
        assert!(err.to_string().contains("STORE_PORT"));
    }
}
