// Suite configuration for page objects and helpers
//
// Defaults match the suite's historical settings. Every field can be
// overridden programmatically or from the environment (`from_env`).

use crate::error::{Error, Result};
use crate::protocol::retry::{RetryOptions, duration_ms};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application under test
pub const DEFAULT_BASE_URL: &str = "https://v0-react-frontend-application-gold.vercel.app";

/// Default wait/assert timeout (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default screenshot directory
pub const DEFAULT_RESULTS_DIR: &str = "test-results/screenshots";

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "E2E_BASE_URL";
/// Environment variable overriding `timeout` (milliseconds)
pub const ENV_TIMEOUT_MS: &str = "E2E_TIMEOUT_MS";
/// Environment variable overriding `results_dir`
pub const ENV_RESULTS_DIR: &str = "E2E_RESULTS_DIR";

/// Settings shared by every page object in a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteConfig {
    /// Origin of the application under test, without trailing slash
    pub base_url: String,
    /// Timeout for waits and assertions
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
    /// Directory screenshots are written to
    pub results_dir: PathBuf,
    /// Options used by `click_with_retry` calls made from page objects
    pub retry: RetryOptions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            retry: RetryOptions::default(),
        }
    }
}

impl SuiteConfig {
    /// Creates a new SuiteConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `E2E_BASE_URL`, `E2E_TIMEOUT_MS` and `E2E_RESULTS_DIR`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.base_url(url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                Error::InvalidArgument(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    ENV_TIMEOUT_MS, raw
                ))
            })?;
            config = config.timeout(Duration::from_millis(ms));
        }

        if let Some(dir) = lookup(ENV_RESULTS_DIR) {
            config = config.results_dir(dir);
        }

        Ok(config)
    }

    /// Set the application origin
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the wait/assert timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the screenshot directory
    pub fn results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Set click retry options
    pub fn retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    /// Absolute URL for an application path (`/login`).
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.url("/login"), format!("{}/login", DEFAULT_BASE_URL));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://localhost:3000/"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_RESULTS_DIR, "out/shots"),
        ]
        .into_iter()
        .collect();

        let config = SuiteConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.results_dir, PathBuf::from("out/shots"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = SuiteConfig::from_lookup(|k| (k == ENV_TIMEOUT_MS).then(|| "soon".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SuiteConfig =
            serde_json::from_str(r#"{"baseUrl":"http://127.0.0.1:8080","timeout":500}"#).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.results_dir, PathBuf::from(DEFAULT_RESULTS_DIR));
    }
}
