use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A user profile as returned by `users/show`.
///
/// Only the fields the report prints are modelled; everything else in the
/// payload is ignored. Counters and free-text fields are optional because
/// suspended or protected accounts may omit them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id_str: String,
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub statuses_count: Option<u64>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub friends_count: Option<u64>,
}

/// The author block embedded in every tweet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TweetAuthor {
    pub name: String,
    pub screen_name: String,
}

/// A single status from `statuses/user_timeline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tweet {
    pub id_str: String,
    pub text: String,
    #[serde(with = "twitter_time")]
    pub created_at: DateTime<Utc>,
    pub user: TweetAuthor,
}

impl Tweet {
    /// Creation time in the machine's local timezone.
    pub fn created_at_local(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }
}

/// Error body returned alongside non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

impl ApiErrorBody {
    /// All messages joined with `"; "`, or `None` when the body had none.
    pub fn message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Response from `oauth2/token`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BearerToken {
    pub token_type: String,
    pub access_token: String,
}

/// `created_at` uses the API's own layout, e.g. `Wed Aug 27 13:08:45 +0000 2008`.
mod twitter_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
