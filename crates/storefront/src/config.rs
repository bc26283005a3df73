//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOUTIQUE_API_BASE_URL` - Base URL of the tabular endpoint (`tables/...` is joined onto it)
//!
//! ## Optional
//! - `BOUTIQUE_API_TOKEN` - Bearer token sent with every request
//! - `BOUTIQUE_DATA_DIR` - Mirror directory (default: .boutique)
//! - `BOUTIQUE_PAGE_LIMIT` - Rows requested per list call (default: 100)
//! - `BOUTIQUE_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime, 0 disables (default: 300)
//! - `BOUTIQUE_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: none)
//! - `BOUTIQUE_CREDENTIAL_SCHEME` - `argon2` or `legacy` (default: argon2)
//! - `BOUTIQUE_HOME_PATH` - Navigation target after logout (default: index.html)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::services::CredentialScheme;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Tabular endpoint configuration
    pub api: ApiConfig,
    /// Directory holding the persistent mirror
    pub data_dir: PathBuf,
    /// Catalog cache lifetime; `None` disables caching
    pub catalog_cache_ttl: Option<Duration>,
    /// Transform applied to passwords of new accounts
    pub credential_scheme: CredentialScheme,
    /// Page navigated to after logout
    pub home_path: String,
    /// Sentry DSN for error tracking (optional)
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (optional)
    pub sentry_environment: Option<String>,
}

/// Tabular endpoint configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL, always ending in `/`
    pub base_url: Url,
    /// Bearer token (optional)
    pub token: Option<SecretString>,
    /// `limit` sent with list requests
    pub page_limit: u32,
    /// Per-request timeout (optional)
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("page_limit", &self.page_limit)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Configuration for `base_url` with defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout: None,
        })
    }
}

const DEFAULT_PAGE_LIMIT: u32 = 100;

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api = ApiConfig::from_lookup(&lookup)?;

        let data_dir = PathBuf::from(get_env_or_default(&lookup, "BOUTIQUE_DATA_DIR", ".boutique"));
        let ttl_secs: u64 = parse_env(&lookup, "BOUTIQUE_CATALOG_CACHE_TTL_SECS", "300")?;
        let catalog_cache_ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));

        let credential_scheme = get_env_or_default(&lookup, "BOUTIQUE_CREDENTIAL_SCHEME", "argon2")
            .parse::<CredentialScheme>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOUTIQUE_CREDENTIAL_SCHEME".to_string(), e))?;

        Ok(Self {
            api,
            data_dir,
            catalog_cache_ttl,
            credential_scheme,
            home_path: get_env_or_default(&lookup, "BOUTIQUE_HOME_PATH", "index.html"),
            sentry_dsn: get_optional_env(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }
}

impl ApiConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get_required_env(lookup, "BOUTIQUE_API_BASE_URL")?;
        let request_timeout = get_optional_env(lookup, "BOUTIQUE_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "BOUTIQUE_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            token: get_optional_env(lookup, "BOUTIQUE_API_TOKEN").map(SecretString::from),
            page_limit: parse_env(lookup, "BOUTIQUE_PAGE_LIMIT", "100")?,
            request_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty counts as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(lookup, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the endpoint base URL so relative paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("BOUTIQUE_API_BASE_URL".to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_API_BASE_URL", "https://api.boutique.fr/v1")]))
                .unwrap();

        assert_eq!(config.api.base_url.as_str(), "https://api.boutique.fr/v1/");
        assert_eq!(config.api.page_limit, 100);
        assert!(config.api.token.is_none());
        assert!(config.api.request_timeout.is_none());
        assert_eq!(config.data_dir, PathBuf::from(".boutique"));
        assert_eq!(config.catalog_cache_ttl, Some(Duration::from_secs(300)));
        assert_eq!(config.credential_scheme, CredentialScheme::Argon2);
        assert_eq!(config.home_path, "index.html");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_base_url() {
        let err = StorefrontConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("BOUTIQUE_API_BASE_URL".to_string()));
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BOUTIQUE_API_BASE_URL", "http://localhost:8080/"),
            ("BOUTIQUE_API_TOKEN", "tok"),
            ("BOUTIQUE_PAGE_LIMIT", "25"),
            ("BOUTIQUE_CATALOG_CACHE_TTL_SECS", "0"),
            ("BOUTIQUE_REQUEST_TIMEOUT_SECS", "5"),
            ("BOUTIQUE_CREDENTIAL_SCHEME", "legacy"),
            ("BOUTIQUE_HOME_PATH", "/"),
        ]))
        .unwrap();

        assert_eq!(config.api.token.as_ref().unwrap().expose_secret(), "tok");
        assert_eq!(config.api.page_limit, 25);
        assert!(config.catalog_cache_ttl.is_none());
        assert_eq!(config.api.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.credential_scheme, CredentialScheme::Legacy);
        assert_eq!(config.home_path, "/");
    }

    #[test]
    fn test_invalid_values() {
        let err = StorefrontConfig::from_lookup(lookup(&[
            ("BOUTIQUE_API_BASE_URL", "http://localhost/"),
            ("BOUTIQUE_PAGE_LIMIT", "beaucoup"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "BOUTIQUE_PAGE_LIMIT"));

        let err = StorefrontConfig::from_lookup(lookup(&[
            ("BOUTIQUE_API_BASE_URL", "http://localhost/"),
            ("BOUTIQUE_CREDENTIAL_SCHEME", "rot13"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "BOUTIQUE_CREDENTIAL_SCHEME"));

        let err = StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_API_BASE_URL", "pas une url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut api = ApiConfig::new("http://localhost/").unwrap();
        api.token = Some(SecretString::from("super-secret".to_string()));
        let rendered = format!("{api:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
