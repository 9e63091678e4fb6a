use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

pub const LIMIT_HEADER: &str = "x-rate-limit-limit";
pub const REMAINING_HEADER: &str = "x-rate-limit-remaining";
pub const RESET_HEADER: &str = "x-rate-limit-reset";

/// Rate-limit window reported by the API for the endpoint just called.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window resets.
    pub reset: DateTime<Utc>,
}

impl RateLimit {
    /// Reads the three `x-rate-limit-*` headers.
    ///
    /// Returns `None` if any of them is missing or not a number.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_number(headers, LIMIT_HEADER)?;
        let remaining = header_number(headers, REMAINING_HEADER)?;
        let reset_epoch: i64 = header_number(headers, RESET_HEADER)?;
        let reset = DateTime::from_timestamp(reset_epoch, 0)?;
        Some(Self {
            limit,
            remaining,
            reset,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
