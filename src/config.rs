//! Application configuration.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional `twitcheck.{toml,yaml,json}` in the working directory
//! 3. `TWITCHECK__*` environment variables (after `.env` is loaded)
//!
//! ```toml
//! credentials_path = "config.json"
//! api_base = "https://api.twitter.com"
//! timeout_secs = 30
//! max_retries = 3
//! tweet_count = 5
//! log_level = "warn"
//! log_json = false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use twitter::{ClientConfig, RetryConfig};

/// Runtime settings for one `twitcheck` invocation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file holding the consumer key and secret.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures (429, 5xx, timeouts).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// How many recent tweets to fetch.
    #[serde(default = "default_tweet_count")]
    pub tweet_count: u32,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            tweet_count: default_tweet_count(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, `twitcheck.*` and the environment.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let builder = config::Config::builder()
            .add_source(config::File::with_name("twitcheck").required(false))
            .add_source(
                config::Environment::with_prefix("TWITCHECK")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    /// Loads configuration from one explicit file, without environment overrides.
    pub fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::from_builder(builder)
            .with_context(|| format!("could not load config file {}", path.display()))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tweet_count == 0 || self.tweet_count > 200 {
            bail!("tweet_count must be between 1 and 200, got {}", self.tweet_count);
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings handed to the API client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_api_base(self.api_base.clone())
            .with_timeout(self.timeout())
            .with_retry(RetryConfig::default().with_max_retries(self.max_retries))
    }
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_tweet_count() -> u32 {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}
