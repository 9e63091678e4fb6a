use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use twitcheck::AppConfig;
use twitcheck::report::{INFO_HEADER, NO_RATE_LIMIT, NO_TWEETS, PROFILE_HEADER, TWEETS_HEADER};

async fn token() -> Response {
    Json(json!({"token_type": "bearer", "access_token": "token"})).into_response()
}

async fn users_show(Query(query): Query<HashMap<String, String>>) -> Response {
    let screen_name = query.get("screen_name").cloned().unwrap_or_default();
    let id = if screen_name == "quiet" { "2" } else { "1" };
    (
        [
            ("x-rate-limit-limit", "900"),
            ("x-rate-limit-remaining", "12"),
            ("x-rate-limit-reset", "1491492255"),
        ],
        Json(json!({
            "id_str": id,
            "name": "Rustacean",
            "screen_name": screen_name,
            "description": "writes\tcode",
            "location": "Earth",
            "statuses_count": 42,
            "followers_count": 7,
            "friends_count": 3
        })),
    )
        .into_response()
}

async fn user_timeline(Query(query): Query<HashMap<String, String>>) -> Response {
    if query.get("id").map(String::as_str) == Some("2") {
        return Json(json!([])).into_response();
    }
    let texts = [
        "The cat sat",
        "the CAT ran\n\naway",
        "cat   naps",
        "The end",
        "THE",
    ];
    let count: usize = query
        .get("count")
        .and_then(|c| c.parse().ok())
        .unwrap_or(20);
    let tweets: Vec<_> = texts
        .iter()
        .take(count)
        .map(|text| {
            json!({
                "id_str": "10",
                "text": text,
                "created_at": "Thu Apr 06 15:24:15 +0000 2017",
                "user": {"name": "Rustacean", "screen_name": "rustacean"}
            })
        })
        .collect();
    Json(tweets).into_response()
}

async fn missing(Query(_): Query<HashMap<String, String>>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"errors": [{"code": 34, "message": "Sorry, that page does not exist."}]})),
    )
        .into_response()
}

async fn spawn(timeline_exists: bool) -> String {
    let timeline = if timeline_exists {
        get(user_timeline)
    } else {
        get(missing)
    };
    let router = Router::new()
        .route("/oauth2/token", post(token))
        .route("/1.1/users/show.json", get(users_show))
        .route("/1.1/statuses/user_timeline.json", timeline);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock api");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock api");
    });
    format!("http://{addr}")
}

fn credentials_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "twitcheck-flow-{}-{name}.json",
        std::process::id()
    ));
    fs::write(&path, r#"{"ConsumerKey":"key","ConsumerSecret":"secret"}"#)
        .expect("write credentials");
    path
}

fn app_config(base: String, credentials_path: PathBuf) -> AppConfig {
    AppConfig {
        credentials_path,
        api_base: base,
        max_retries: 0,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn full_report_for_user_with_tweets() -> anyhow::Result<()> {
    let base = spawn(true).await;
    let creds = credentials_file("tweets");
    let report = twitcheck::run("rustacean", &app_config(base, creds.clone())).await;
    fs::remove_file(&creds).ok();
    let report = report?;

    assert!(report.starts_with(PROFILE_HEADER));
    assert!(report.contains("Description:          writes code\n"));
    assert!(report.contains("Tweets:               42\n"));
    assert!(report.contains(INFO_HEADER));
    assert!(report.contains("Rate limit remaining: 12\n"));
    assert!(report.contains(TWEETS_HEADER));
    assert!(report.contains("1 : The cat sat\n"));
    assert!(report.contains("2 : the CAT ran away\n"));
    assert!(report.contains("3 : cat naps\n"));
    assert!(report.contains("\tBy, Rustacean at "));
    assert!(!report.contains("6 : "));
    // "the" and "cat" both reach 3 after four tweets; the fifth breaks the tie.
    assert!(report.contains("Most Common Word Tweeted: the\n"));
    // The timeline response carries no rate limit headers.
    assert!(report.trim_end().ends_with(NO_RATE_LIMIT));
    Ok(())
}

#[tokio::test]
async fn tweet_count_limits_the_timeline() -> anyhow::Result<()> {
    let base = spawn(true).await;
    let creds = credentials_file("count");
    let config = AppConfig {
        tweet_count: 3,
        ..app_config(base, creds.clone())
    };
    let report = twitcheck::run("rustacean", &config).await;
    fs::remove_file(&creds).ok();
    let report = report?;

    assert!(report.contains("3 : cat naps\n"));
    assert!(!report.contains("4 : "));
    // the: 2, cat: 3
    assert!(report.contains("Most Common Word Tweeted: cat\n"));
    Ok(())
}

#[tokio::test]
async fn empty_timeline_reports_no_tweets() -> anyhow::Result<()> {
    let base = spawn(true).await;
    let creds = credentials_file("empty");
    let report = twitcheck::run("quiet", &app_config(base, creds.clone())).await;
    fs::remove_file(&creds).ok();
    let report = report?;

    assert!(report.contains(NO_TWEETS));
    assert!(!report.contains("Most Common Word Tweeted"));
    Ok(())
}

#[tokio::test]
async fn timeline_failure_is_reported_with_context() {
    let base = spawn(false).await;
    let creds = credentials_file("missing");
    let err = twitcheck::run("rustacean", &app_config(base, creds.clone()))
        .await
        .expect_err("timeline 404");
    fs::remove_file(&creds).ok();

    let chain = format!("{err:#}");
    assert!(chain.contains("could not fetch tweets for 'rustacean'"));
    assert!(chain.contains("Sorry, that page does not exist."));
}

#[tokio::test]
async fn missing_credentials_file_fails_before_network() {
    let config = app_config(
        "http://127.0.0.1:1".into(),
        PathBuf::from("/definitely/not/here/config.json"),
    );
    let err = twitcheck::run("rustacean", &config)
        .await
        .expect_err("missing credentials");
    assert!(format!("{err:#}").contains("could not parse credentials file"));
}
