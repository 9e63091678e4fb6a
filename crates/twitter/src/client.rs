//! App-only client for the two read endpoints the report needs.
//!
//! Authentication follows the application-only flow: the consumer key and
//! secret are exchanged once for a bearer token at `oauth2/token`, and that
//! token is sent with every later request. The token is cached for the life
//! of the client.

use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::config::{ClientConfig, Credentials};
use crate::rate_limit::RateLimit;
use crate::retry::execute_with_retry_async;
use crate::types::{ApiErrorBody, BearerToken, Tweet, User};
use crate::TwitterError;

pub const TOKEN_PATH: &str = "oauth2/token";
pub const USER_SHOW_PATH: &str = "1.1/users/show.json";
pub const USER_TIMELINE_PATH: &str = "1.1/statuses/user_timeline.json";

/// Status, timing and quota of one API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseInfo {
    pub status: StatusCode,
    /// Wall time of the call, retries included.
    pub elapsed: Duration,
    pub rate_limit: Option<RateLimit>,
}

/// A parsed response body together with its [`ResponseInfo`].
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub info: ResponseInfo,
}

pub struct TwitterClient {
    http: reqwest::Client,
    credentials: Credentials,
    config: ClientConfig,
    bearer: OnceCell<String>,
}

impl TwitterClient {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, TwitterError> {
        credentials.validate()?;
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("twitcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            credentials,
            config,
            bearer: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Looks up a profile by screen name.
    pub async fn user_show(&self, screen_name: &str) -> Result<ApiResponse<User>, TwitterError> {
        let screen_name = screen_name.trim().trim_start_matches('@');
        if screen_name.is_empty() {
            return Err(TwitterError::InvalidRequest(
                "screen_name must not be empty".into(),
            ));
        }
        self.get(USER_SHOW_PATH, &[("screen_name", screen_name.to_string())])
            .await
    }

    /// Fetches up to `count` of the most recent tweets for a user id.
    pub async fn user_timeline(
        &self,
        user_id: &str,
        count: u32,
    ) -> Result<ApiResponse<Vec<Tweet>>, TwitterError> {
        if user_id.is_empty() {
            return Err(TwitterError::InvalidRequest(
                "user id must not be empty".into(),
            ));
        }
        if count == 0 {
            return Err(TwitterError::InvalidRequest(
                "count must be at least 1".into(),
            ));
        }
        self.get(
            USER_TIMELINE_PATH,
            &[("id", user_id.to_string()), ("count", count.to_string())],
        )
        .await
    }

    async fn bearer_token(&self) -> Result<&str, TwitterError> {
        self.bearer
            .get_or_try_init(|| self.fetch_bearer_token())
            .await
            .map(String::as_str)
    }

    async fn fetch_bearer_token(&self) -> Result<String, TwitterError> {
        let url = self.config.endpoint(TOKEN_PATH);
        let basic = format!(
            "Basic {}",
            STANDARD.encode(format!(
                "{}:{}",
                self.credentials.consumer_key, self.credentials.consumer_secret
            ))
        );
        tracing::debug!(%url, "requesting bearer token");

        let http = &self.http;
        let url = url.as_str();
        let basic = basic.as_str();
        let outcome = execute_with_retry_async(&self.config.retry, move |_| async move {
            let response = http
                .post(url)
                .header(AUTHORIZATION, basic)
                .form(&[("grant_type", "client_credentials")])
                .send()
                .await?;
            let status = response.status();
            let body = response.bytes().await?;

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(TwitterError::Auth(error_message(status, &body)));
            }
            if !status.is_success() {
                return Err(api_error(status, &body));
            }

            let token: BearerToken = serde_json::from_slice(&body)?;
            Ok(token)
        })
        .await;

        let token = outcome.into_result()?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(TwitterError::Auth(format!(
                "expected a bearer token, got '{}'",
                token.token_type
            )));
        }
        if token.access_token.is_empty() {
            return Err(TwitterError::Auth("token endpoint returned an empty token".into()));
        }
        Ok(token.access_token)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, TwitterError> {
        let token = self.bearer_token().await?;
        let url = self.config.endpoint(path);
        tracing::debug!(%url, ?query, "sending request");

        let http = &self.http;
        let url_ref = url.as_str();
        let started = Instant::now();
        let outcome = execute_with_retry_async(&self.config.retry, move |_| async move {
            let response = http
                .get(url_ref)
                .bearer_auth(token)
                .query(query)
                .send()
                .await?;
            let status = response.status();
            let rate_limit = rate_limit_of(response.headers());
            let body = response.bytes().await?;

            if !status.is_success() {
                return Err(api_error(status, &body));
            }

            let data: T = serde_json::from_slice(&body)?;
            Ok((data, status, rate_limit))
        })
        .await;
        let elapsed = started.elapsed();
        let attempts = outcome.attempts;

        let (data, status, rate_limit) = outcome.into_result()?;
        tracing::info!(
            %url,
            %status,
            attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            remaining = rate_limit.map(|r| r.remaining),
            "request complete"
        );

        Ok(ApiResponse {
            data,
            info: ResponseInfo {
                status,
                elapsed,
                rate_limit,
            },
        })
    }
}

fn rate_limit_of(headers: &HeaderMap) -> Option<RateLimit> {
    let rate_limit = RateLimit::from_headers(headers);
    if rate_limit.is_none() {
        tracing::debug!("response carried no usable rate limit headers");
    }
    rate_limit
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

fn api_error(status: StatusCode, body: &[u8]) -> TwitterError {
    TwitterError::Api {
        status,
        message: error_message(status, body),
    }
}
