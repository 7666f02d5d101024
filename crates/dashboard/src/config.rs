//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DASHBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHBOARD_PORT` - Listen port (default: 3001)
//! - `DASHBOARD_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://127.0.0.1:3001>)
//! - `DASHBOARD_MOCK_DELAY_MS` - Simulated latency of login, registration and
//!   plan selection in milliseconds (default: 1000)
//! - `DASHBOARD_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/dashboard/static)
//! - `MATJARI_LOG_JSON` - Emit JSON logs (`1`/`true`/`yes` or `0`/`false`/`no`,
//!   default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 1.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MOCK_DELAY_MS: u64 = 1000;
const DEFAULT_STATIC_DIR: &str = "crates/dashboard/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Latency simulated by the mocked account operations
    pub mock_delay: Duration,
    /// Directory with stylesheets and images
    pub static_dir: PathBuf,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate
    pub sentry_traces_sample_rate: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: format!("http://127.0.0.1:{DEFAULT_PORT}"),
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Unset
    /// variables fall back to [`DashboardConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env("DASHBOARD_HOST")?.unwrap_or(defaults.host);
        let port = parse_env("DASHBOARD_PORT")?.unwrap_or(defaults.port);
        let base_url = get_optional_env("DASHBOARD_BASE_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}"));
        let mock_delay = parse_env::<u64>("DASHBOARD_MOCK_DELAY_MS")?
            .map_or(defaults.mock_delay, Duration::from_millis);
        let static_dir = get_optional_env("DASHBOARD_STATIC_DIR")
            .map_or(defaults.static_dir, PathBuf::from);
        let log_json = get_optional_env("MATJARI_LOG_JSON")
            .map(|raw| parse_flag("MATJARI_LOG_JSON", &raw))
            .transpose()?
            .unwrap_or(defaults.log_json);
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_env("SENTRY_SAMPLE_RATE")?
            .unwrap_or(defaults.sentry_sample_rate);
        let sentry_traces_sample_rate = parse_env("SENTRY_TRACES_SAMPLE_RATE")?
            .unwrap_or(defaults.sentry_traces_sample_rate);

        Ok(Self {
            host,
            port,
            base_url,
            mock_delay,
            static_dir,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an optional environment variable.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key)
        .map(|raw| parse_value(key, &raw))
        .transpose()
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

/// Parse an on/off switch.
fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got `{other}`"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.mock_delay, Duration::from_millis(1000));
        assert!(!config.is_secure());
    }

    #[test]
    fn test_socket_addr() {
        let config = DashboardConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..DashboardConfig::default()
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_is_secure() {
        let config = DashboardConfig {
            base_url: "https://dashboard.matjari.sa".to_string(),
            ..DashboardConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u16>("PORT", " 3002 ").unwrap(), 3002);

        let err = parse_value::<u16>("DASHBOARD_PORT", "http").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "DASHBOARD_PORT"));

        assert!(parse_value::<IpAddr>("DASHBOARD_HOST", "localhost:1").is_err());
    }

    #[test]
    fn test_parse_flag() {
        for raw in ["1", "true", "TRUE", " yes "] {
            assert!(parse_flag("MATJARI_LOG_JSON", raw).unwrap(), "{raw}");
        }
        for raw in ["0", "false", "no", ""] {
            assert!(!parse_flag("MATJARI_LOG_JSON", raw).unwrap(), "{raw}");
        }
        assert!(parse_flag("MATJARI_LOG_JSON", "json").is_err());
    }
}
