//! Client configuration.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Environment variable selecting the deck service origin.
pub const BASE_URL_ENV: &str = "DOBBLE_API_BASE";

/// Service origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds. PDF rendering of large decks is slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// User agent string for all requests.
pub const USER_AGENT_VALUE: &str = concat!("dobble-client/", env!("CARGO_PKG_VERSION"));

/// Settings for [`DobbleClient`](crate::DobbleClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin (and optional path prefix) of the deck service.
    pub base_url: String,

    /// Base against which relative image references are resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_base: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `Authorization` header value attached to image fetches when the
    /// credentials mode allows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            asset_base: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auth_header: None,
        }
    }

    /// Reads the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(None, std::env::var(BASE_URL_ENV).ok())
    }

    /// Picks the base URL by precedence: explicit value, environment, default.
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn resolve(explicit: Option<String>, env_value: Option<String>) -> Self {
        let base_url = explicit
            .filter(|value| !value.trim().is_empty())
            .or_else(|| env_value.filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url.trim())
    }

    #[must_use]
    pub fn with_asset_base(mut self, asset_base: Option<String>) -> Self {
        self.asset_base = asset_base;
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_auth_header(mut self, value: Option<String>) -> Self {
        self.auth_header = value;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of a service endpoint such as `dobble/validate`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))
    }

    /// Parsed asset base, if configured.
    pub fn asset_base_url(&self) -> Result<Option<Url>> {
        self.asset_base
            .as_deref()
            .map(|base| {
                Url::parse(base).map_err(|e| ClientError::InvalidUrl(format!("{base}: {e}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        let config = ClientConfig::resolve(
            Some("http://explicit:1".to_string()),
            Some("http://env:2".to_string()),
        );
        assert_eq!(config.base_url, "http://explicit:1");

        let config = ClientConfig::resolve(None, Some("http://env:2".to_string()));
        assert_eq!(config.base_url, "http://env:2");

        let config = ClientConfig::resolve(Some("  ".to_string()), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_joins_path() {
        let config = ClientConfig::new("http://api.example.com/v1/");
        assert_eq!(
            config.endpoint("dobble/validate").unwrap().as_str(),
            "http://api.example.com/v1/dobble/validate"
        );
        assert_eq!(
            config.endpoint("/dobble/generate").unwrap().as_str(),
            "http://api.example.com/v1/dobble/generate"
        );
    }

    #[test]
    fn test_endpoint_rejects_garbage() {
        let config = ClientConfig::new("not a url");
        assert!(matches!(
            config.endpoint("dobble/validate"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://h:9"}"#).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.asset_base.is_none());
        assert_eq!(config.asset_base_url().unwrap(), None);
    }
}
