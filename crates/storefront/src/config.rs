//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_CONTENT_DIR` - Site content directory (default: crates/storefront/content)
//! - `STOREFRONT_CURRENCY` - ISO 4217 currency for carts (default: USD)
//! - `STOREFRONT_CART_TTL_SECS` - Idle cart lifetime in seconds (default: 7 days)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use bazaar_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_CART_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront, without a trailing slash
    pub base_url: String,
    /// Directory holding `pages.json`, `offers.json`, and friends
    pub content_dir: PathBuf,
    /// Currency every cart is priced in
    pub currency: CurrencyCode,
    /// How long an untouched cart is kept
    pub cart_ttl: Duration,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry configuration.
///
/// The DSN embeds a project key, so it is held as a secret and redacted from
/// `Debug` output.
#[derive(Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<SecretString>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .field("traces_sample_rate", &self.traces_sample_rate)
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = parse_env::<Url>("STOREFRONT_BASE_URL", "http://localhost:3000")?
            .as_str()
            .trim_end_matches('/')
            .to_string();
        let content_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_CONTENT_DIR",
            "crates/storefront/content",
        ));
        let currency = parse_env("STOREFRONT_CURRENCY", "USD")?;
        let cart_ttl = Duration::from_secs(parse_env(
            "STOREFRONT_CART_TTL_SECS",
            &DEFAULT_CART_TTL_SECS.to_string(),
        )?);
        let sentry = SentryConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            content_dir,
            currency,
            cart_ttl,
            sentry,
        })
    }

    /// Defaults suitable for tests and local development.
    #[must_use]
    pub fn local(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            content_dir: content_dir.into(),
            currency: CurrencyCode::USD,
            cart_ttl: Duration::from_secs(DEFAULT_CART_TTL_SECS),
            sentry: SentryConfig::default(),
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_parse_value_reports_variable_name() {
        let ConfigError::InvalidEnvVar(key, _) =
            parse_value::<u16>("STOREFRONT_PORT", "not-a-port").unwrap_err();
        assert_eq!(key, "STOREFRONT_PORT");
    }

    #[test]
    fn test_parse_value_trims() {
        let port: u16 = parse_value("STOREFRONT_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
        let currency: CurrencyCode = parse_value("STOREFRONT_CURRENCY", "gbp").unwrap();
        assert_eq!(currency, CurrencyCode::GBP);
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::local("content");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_https());
    }

    #[test]
    fn test_base_url_must_parse() {
        assert!(parse_value::<Url>("STOREFRONT_BASE_URL", "not a url").is_err());
        assert!(parse_value::<Url>("STOREFRONT_BASE_URL", "https://shop.example.com").is_ok());
    }

    #[test]
    fn test_is_https() {
        let mut config = StorefrontConfig::local("content");
        config.base_url = "https://shop.example.com".to_string();
        assert!(config.is_https());
    }

    #[test]
    fn test_sentry_config_debug_redacts_dsn() {
        let config = SentryConfig {
            dsn: Some(SecretString::from("https://key@o0.ingest.sentry.io/1")),
            environment: Some("staging".to_string()),
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("staging"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("ingest.sentry.io"));
        assert_eq!(
            config.dsn.as_ref().unwrap().expose_secret(),
            "https://key@o0.ingest.sentry.io/1"
        );
    }
}
