//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All are optional; defaults match a local development backend.
//!
//! - `URVANN_API_URL` - Catalog API base URL (default: `http://localhost:5000/api`)
//! - `URVANN_API_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `URVANN_DATA_DIR` - Directory for locally persisted state (default: `.urvann`)
//! - `URVANN_ADMIN_USERNAME` - Admin login name (default: `admin`)
//! - `URVANN_ADMIN_PASSWORD` - Admin password (default: `admin123`)
//! - `URVANN_ADMIN_EMAIL` - Admin email shown once logged in (default: `admin@urvann.com`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DATA_DIR: &str = ".urvann";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API settings
    pub api: ApiConfig,
    /// Directory holding the file-backed local storage
    pub data_dir: PathBuf,
    /// Credentials accepted by the admin gate
    pub admin: AdminConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

/// Hardcoded admin credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: SecretString,
    pub email: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: SecretString::from("admin123"),
            email: "admin@urvann.com".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let base_url = parse_base_url(&get_or("URVANN_API_URL", DEFAULT_API_URL))?;
        let timeout_secs = get_or("URVANN_API_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("URVANN_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "URVANN_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let defaults = AdminConfig::default();
        let admin = AdminConfig {
            username: lookup("URVANN_ADMIN_USERNAME").unwrap_or(defaults.username),
            password: lookup("URVANN_ADMIN_PASSWORD").map_or(defaults.password, SecretString::from),
            email: lookup("URVANN_ADMIN_EMAIL").unwrap_or(defaults.email),
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            data_dir: PathBuf::from(get_or("URVANN_DATA_DIR", DEFAULT_DATA_DIR)),
            admin,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

/// Parse the API base URL, forcing a trailing slash so relative joins keep
/// the path prefix (`.../api` + `plants` -> `.../api/plants`).
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("URVANN_API_URL".to_string(), msg);

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
