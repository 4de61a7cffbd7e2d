//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PICKING_DATABASE_URL` - `PostgreSQL` connection string
//! - `PICKING_BASE_URL` - Public URL for the server (the OAuth redirect URI
//!   is derived from it and must match the value registered with Mercado
//!   Livre byte-for-byte)
//! - `MELI_CLIENT_ID` - Mercado Livre application ID
//! - `MELI_CLIENT_SECRET` - Mercado Livre application secret
//!
//! ## Optional
//! - `PICKING_HOST` - Bind address (default: 127.0.0.1)
//! - `PICKING_PORT` - Listen port (default: 3000)
//! - `MELI_AUTH_BASE` - Authorization endpoint base (default: <https://auth.mercadolibre.com.br>)
//! - `MELI_API_BASE` - REST API base (default: <https://api.mercadolibre.com>)
//! - `MELI_DEMO_MODE` - When "true", order sync imports a fixed demo batch
//!   instead of calling the marketplace
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the server
    pub base_url: String,
    /// Mercado Livre API configuration
    pub meli: MeliConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Mercado Livre API configuration.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct MeliConfig {
    /// Authorization endpoint base URL
    pub auth_base: String,
    /// REST API base URL
    pub api_base: String,
    /// OAuth application ID
    pub client_id: String,
    /// OAuth application secret (back-channel only, never shipped to the browser)
    pub client_secret: SecretString,
    /// Import the fixed demo batch instead of calling the marketplace
    pub demo_mode: bool,
}

impl std::fmt::Debug for MeliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeliConfig")
            .field("auth_base", &self.auth_base)
            .field("api_base", &self.api_base)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("demo_mode", &self.demo_mode)
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
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PICKING_DATABASE_URL")?;
        let host = get_env_or_default("PICKING_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PICKING_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PICKING_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PICKING_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("PICKING_BASE_URL")?;

        let meli = MeliConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            meli,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The OAuth redirect URI, derived from the public base URL.
    ///
    /// Must match the URI registered with Mercado Livre byte-for-byte; the
    /// same value is sent in both the authorization request and the token
    /// exchange.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("{}/auth/meli/callback", self.base_url)
    }
}

impl MeliConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            auth_base: get_env_or_default("MELI_AUTH_BASE", "https://auth.mercadolibre.com.br"),
            api_base: get_env_or_default("MELI_API_BASE", "https://api.mercadolibre.com"),
            client_id: get_required_env("MELI_CLIENT_ID")?,
            client_secret: get_validated_secret("MELI_CLIENT_SECRET")?,
            demo_mode: get_env_or_default("MELI_DEMO_MODE", "false") == "true",
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real application secrets have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-client-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_redirect_uri_derivation() {
        let config = test_config("https://picking.example.app");
        assert_eq!(
            config.redirect_uri(),
            "https://picking.example.app/auth/meli/callback"
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config("http://localhost:3000");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_meli_config_debug_redacts_secret() {
        let config = test_config("http://localhost:3000");
        let debug_output = format!("{:?}", config.meli);

        assert!(debug_output.contains("client_id_value"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_private_value"));
    }

    fn test_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: base_url.to_string(),
            meli: MeliConfig {
                auth_base: "https://auth.mercadolibre.com.br".to_string(),
                api_base: "https://api.mercadolibre.com".to_string(),
                client_id: "client_id_value".to_string(),
                client_secret: SecretString::from("super_private_value"),
                demo_mode: false,
            },
            sentry_dsn: None,
        }
    }
}
