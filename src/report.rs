//! Plain-text report blocks.
//!
//! Rendering is pure: every function takes the parsed API records and returns
//! a `String`, so the layout can be tested without a network. Timestamps are
//! shown in the caller's timezone; the `*_in` variants take it explicitly.

use std::fmt::{self, Write};

use chrono::{DateTime, Local, TimeZone, Utc};
use twitter::{ResponseInfo, Tweet, User};
use wordstats::{Histogram, collapse_whitespace, normalize_whitespace};

pub const PROFILE_HEADER: &str = "-------------------Profile-------------------";
pub const INFO_HEADER: &str = "---------------------Info--------------------";
pub const TWEETS_HEADER: &str = "-------------------Tweets-------------------";
pub const NO_TWEETS: &str = "(Could not collect Tweets.)";
pub const NO_RATE_LIMIT: &str = "(Could not parse rate limit from response.)";

const MISSING: &str = "(not provided)";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

// Labels are padded so values line up in one column.
fn field(out: &mut String, label: &str, value: impl fmt::Display) {
    let _ = writeln!(out, "{label:<21} {value}");
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// The profile block.
pub fn render_profile(user: &User) -> String {
    let mut out = String::new();
    out.push_str(PROFILE_HEADER);
    out.push('\n');
    field(&mut out, "Name:", &user.name);
    field(&mut out, "Screen Name:", &user.screen_name);
    field(
        &mut out,
        "Description:",
        optional(user.description.as_deref().map(collapse_whitespace)),
    );
    field(&mut out, "Location:", optional(user.location.as_deref()));
    field(&mut out, "Tweets:", optional(user.statuses_count));
    field(&mut out, "Followers:", optional(user.followers_count));
    field(&mut out, "Following:", optional(user.friends_count));
    out
}

/// Status, timing and rate limit of the last call, in local time.
pub fn render_response_info(info: &ResponseInfo) -> String {
    render_response_info_in(info, &Local)
}

pub fn render_response_info_in<Tz>(info: &ResponseInfo, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    out.push_str(INFO_HEADER);
    out.push('\n');
    field(&mut out, "Status:", info.status);
    field(
        &mut out,
        "Time Elapsed:",
        format_args!("{:.6}s", info.elapsed.as_secs_f64()),
    );
    match info.rate_limit {
        Some(rate) => {
            field(&mut out, "Rate limit:", rate.limit);
            field(&mut out, "Rate limit remaining:", rate.remaining);
            field(&mut out, "Rate limit reset:", format_time(&rate.reset, tz));
        }
        None => {
            out.push_str(NO_RATE_LIMIT);
            out.push('\n');
        }
    }
    out
}

fn format_time<Tz>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.with_timezone(tz).format(TIME_FORMAT).to_string()
}

/// One tweet as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetLine {
    /// Tweet text with whitespace runs collapsed to single spaces.
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// The tweets block: display lines plus the most common word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetsReport {
    pub lines: Vec<TweetLine>,
    /// `None` when there were no tweets at all.
    pub most_common_word: Option<String>,
}

impl TweetsReport {
    /// Normalizes each tweet for display and counts words in the raw text.
    pub fn from_tweets(tweets: &[Tweet]) -> Self {
        if tweets.is_empty() {
            return Self {
                lines: Vec::new(),
                most_common_word: None,
            };
        }

        let mut histogram = Histogram::new();
        let lines = tweets
            .iter()
            .map(|tweet| {
                histogram.accumulate(&tweet.text);
                TweetLine {
                    text: normalize_whitespace(&tweet.text),
                    author: tweet.user.name.clone(),
                    created_at: tweet.created_at,
                }
            })
            .collect();

        Self {
            lines,
            most_common_word: Some(histogram.most_common()),
        }
    }

    pub fn render(&self) -> String {
        self.render_in(&Local)
    }

    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        out.push('\n');
        out.push_str(TWEETS_HEADER);
        out.push('\n');

        let Some(word) = &self.most_common_word else {
            out.push_str(NO_TWEETS);
            out.push('\n');
            return out;
        };

        for (i, line) in self.lines.iter().enumerate() {
            let _ = writeln!(out, "{} : {}", i + 1, line.text);
            let _ = writeln!(
                out,
                "\tBy, {} at {}",
                line.author,
                format_time(&line.created_at, tz)
            );
            out.push('\n');
        }
        let _ = writeln!(out, "Most Common Word Tweeted: {word}");
        out
    }
}
