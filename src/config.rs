use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::{AlertClientError, Result};

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "ALERT_API_URL";

/// Environment variable holding the request timeout
///
/// Accepts whole seconds (`15`) or a humantime duration (`500ms`, `1m 30s`).
pub const ENV_TIMEOUT: &str = "ALERT_API_TIMEOUT";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Settings for an [`AlertClient`](crate::AlertClient)
///
/// Deserializable so it can sit inside an application's own config file:
///
/// ```toml
/// base_url = "https://alerts.example.com/api"
/// timeout = "750ms"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the alert API; a trailing slash is ignored
    pub base_url: Url,

    /// Per-request timeout. `None` leaves requests unbounded.
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Settings for `base_url` with no request timeout
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    /// Load settings from `ALERT_API_URL` and `ALERT_API_TIMEOUT`
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// timeout is zero.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BASE_URL) {
            config.base_url = Url::parse(raw.trim())
                .map_err(|e| AlertClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            config.timeout = Some(parse_timeout(raw.trim())?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Bound every request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check that the timeout, if any, is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(AlertClientError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(raw)
        .map_err(|e| AlertClientError::Config(format!("{ENV_TIMEOUT}={raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert!(config.timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://alerts.example.com/api/"),
            (ENV_TIMEOUT, " 15 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://alerts.example.com/api/");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_lookup_keeps_sub_second_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT, "500ms")])).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "not a url")])).unwrap_err();
        assert!(matches!(err, AlertClientError::InvalidBaseUrl(_)));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT, "ten")])).unwrap_err();
        assert!(matches!(err, AlertClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT, "0")])).unwrap_err();
        assert!(matches!(err, AlertClientError::Config(_)));
    }

    #[test]
    fn test_config_deserialization() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_url": "http://alerts.internal:3000", "timeout": "750ms"}"#,
        )
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(750)));

        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "http://alerts.internal:3000"}"#).unwrap();
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_with_timeout_keeps_precision() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout, Some(Duration::from_millis(500)));

        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(AlertClientError::Config(_))));
    }
}
