//! `twitcheck`: pull a single user's profile and recent tweets, then report
//! the word they use most.
//!
//! The crate stitches the workspace together:
//!
//! - [`twitter`] talks to the API and hands back typed records
//! - [`wordstats`] normalizes tweet text and counts words
//! - [`report`] lays the results out as plain text
//!
//! [`run`] performs one complete lookup and returns the report; `main` only
//! parses arguments, loads [`AppConfig`] and prints.

pub mod config;
pub mod report;

pub use crate::config::AppConfig;
pub use crate::report::{
    TweetLine, TweetsReport, render_profile, render_response_info, render_response_info_in,
};

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use twitter::{Credentials, TwitterClient};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.log_level`. Logs go to stderr so stdout only
/// carries the report.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Builds an API client from the credentials file named in `config`.
pub fn build_client(config: &AppConfig) -> anyhow::Result<TwitterClient> {
    let credentials = Credentials::from_file(&config.credentials_path).with_context(|| {
        format!(
            "could not parse credentials file {}",
            config.credentials_path.display()
        )
    })?;
    TwitterClient::new(credentials, config.client_config()).context("could not build api client")
}

/// Looks up `screen_name` and returns the full report text.
pub async fn run(screen_name: &str, config: &AppConfig) -> anyhow::Result<String> {
    let client = build_client(config)?;
    run_with_client(&client, screen_name, config.tweet_count).await
}

/// Same as [`run`], with a caller-supplied client.
pub async fn run_with_client(
    client: &TwitterClient,
    screen_name: &str,
    tweet_count: u32,
) -> anyhow::Result<String> {
    tracing::info!(screen_name, "looking up user");
    let user = client
        .user_show(screen_name)
        .await
        .with_context(|| format!("could not look up user '{screen_name}'"))?;

    let mut out = render_profile(&user.data);
    out.push('\n');
    out.push_str(&render_response_info(&user.info));

    tracing::info!(user_id = %user.data.id_str, tweet_count, "fetching timeline");
    let timeline = client
        .user_timeline(&user.data.id_str, tweet_count)
        .await
        .with_context(|| format!("could not fetch tweets for '{}'", user.data.screen_name))?;

    let tweets = TweetsReport::from_tweets(&timeline.data);
    if let Some(word) = &tweets.most_common_word {
        tracing::debug!(word = %word, tweets = tweets.lines.len(), "most common word");
    }
    out.push_str(&tweets.render());
    out.push_str(&render_response_info(&timeline.info));

    Ok(out)
}
