//! Thin client for the Twitter v1.1 API.
//!
//! Covers exactly what `twitcheck` needs: app-only authentication, profile
//! lookup by screen name, and a user's most recent tweets. Responses are
//! parsed into strongly typed records ([`User`], [`Tweet`]) with optional
//! fields instead of loosely typed maps, and every call reports its status,
//! elapsed time and rate-limit window through [`ResponseInfo`].
//!
//! ```no_run
//! use twitter::{ClientConfig, Credentials, TwitterClient};
//!
//! # async fn run() -> Result<(), twitter::TwitterError> {
//! let credentials = Credentials::from_file("config.json")?;
//! let client = TwitterClient::new(credentials, ClientConfig::default())?;
//!
//! let user = client.user_show("TwitterDev").await?;
//! let tweets = client.user_timeline(&user.data.id_str, 5).await?;
//! println!("{} tweets fetched", tweets.data.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod rate_limit;
pub mod retry;
mod serde_millis;
mod types;

pub use crate::client::{
    ApiResponse, ResponseInfo, TwitterClient, TOKEN_PATH, USER_SHOW_PATH, USER_TIMELINE_PATH,
};
pub use crate::config::{ClientConfig, Credentials};
pub use crate::error::TwitterError;
pub use crate::rate_limit::RateLimit;
pub use crate::retry::RetryConfig;
pub use crate::types::{ApiErrorBody, ApiErrorDetail, Tweet, TweetAuthor, User};
pub use reqwest::StatusCode;
