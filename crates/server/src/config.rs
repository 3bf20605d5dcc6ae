//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults reproduce the behavior of the
//! original deployment.
//!
//! - `VOLGA_HOST` - Bind address (default: 127.0.0.1)
//! - `VOLGA_PORT` - Listen port (default: 3000)
//! - `VOLGA_DATA_DIR` - Directory holding the JSON documents (default: data)
//! - `VOLGA_UPLOAD_DIR` - Directory for uploaded product images (default: uploads)
//! - `VOLGA_ADMIN_USERNAME` - Admin login (default: admin)
//! - `VOLGA_ADMIN_PASSWORD` - Admin password (default: volga123)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding `products.json` and `messages.json`
    pub data_dir: PathBuf,
    /// Directory where uploaded images are written
    pub upload_dir: PathBuf,
    /// Fixed admin credential pair
    pub admin: AdminCredentials,
}

/// The single admin credential pair.
///
/// There is exactly one admin account and no password hashing; the
/// comparison is exact-string equality. This reproduces the source
/// system's behavior and is deliberately kept (single-admin design).
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl AdminCredentials {
    /// Check a submitted credential pair against the configured one.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("VOLGA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLGA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VOLGA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLGA_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("VOLGA_DATA_DIR", "data"));
        let upload_dir = PathBuf::from(get_env_or_default("VOLGA_UPLOAD_DIR", "uploads"));

        let admin = AdminCredentials {
            username: get_env_or_default("VOLGA_ADMIN_USERNAME", "admin"),
            password: SecretString::from(get_env_or_default("VOLGA_ADMIN_PASSWORD", "volga123")),
        };

        Ok(Self {
            host,
            port,
            data_dir,
            upload_dir,
            admin,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            upload_dir: PathBuf::from("uploads"),
            admin: AdminCredentials {
                username: "admin".to_string(),
                password: SecretString::from("volga123"),
            },
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
    fn test_admin_credentials_match() {
        let admin = test_config().admin;
        assert!(admin.matches("admin", "volga123"));
        assert!(!admin.matches("admin", "wrong"));
        assert!(!admin.matches("root", "volga123"));
        assert!(!admin.matches("", ""));
    }

    #[test]
    fn test_admin_credentials_debug_redacts_password() {
        let admin = test_config().admin;
        let debug_output = format!("{admin:?}");
        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("volga123"));
    }
}
