//! Credentials and client settings.
//!
//! Credentials come from a small JSON file holding the application's
//! consumer key and secret:
//!
//! ```json
//! {
//!   "consumer_key": "xvz1evFS4wEEPTGEFPHBog",
//!   "consumer_secret": "L8qq9PZyRg6ieKGEKhZolGC0vJWLw8iEJ88DRdyOg"
//! }
//! ```
//!
//! The `ConsumerKey` / `ConsumerSecret` spelling used by older tooling is
//! accepted too.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;
use crate::TwitterError;

/// Application credentials for app-only authentication.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(alias = "ConsumerKey")]
    pub consumer_key: String,
    #[serde(alias = "ConsumerSecret")]
    pub consumer_secret: String,
}

// Keeps the secret out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Reads and validates a credentials file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TwitterError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Parses and validates credentials from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, TwitterError> {
        let credentials: Credentials = serde_json::from_str(raw)?;
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn validate(&self) -> Result<(), TwitterError> {
        if self.consumer_key.trim().is_empty() {
            return Err(TwitterError::InvalidConfig("consumer_key is empty".into()));
        }
        if self.consumer_secret.trim().is_empty() {
            return Err(TwitterError::InvalidConfig(
                "consumer_secret is empty".into(),
            ));
        }
        Ok(())
    }
}

/// Client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host every endpoint path is appended to.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout", with = "crate::serde_millis")]
    pub timeout: Duration,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), TwitterError> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(TwitterError::InvalidConfig(format!(
                "api_base must be an http(s) url, got '{}'",
                self.api_base
            )));
        }
        if self.timeout.is_zero() {
            return Err(TwitterError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Joins `path` onto the base without doubling the slash.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
