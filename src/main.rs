//! twitcheck - profile and most-used word for one Twitter user.
//!
//! Usage: `twitcheck [screen_name]`

use anyhow::bail;
use twitcheck::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(screen_name) = std::env::args().nth(1) else {
        bail!("No Twitter ScreenName provided.\nUsage: twitcheck [screen_name]");
    };

    let config = AppConfig::load()?;
    twitcheck::init_tracing(&config);

    let report = twitcheck::run(&screen_name, &config).await?;
    print!("{report}");

    Ok(())
}
