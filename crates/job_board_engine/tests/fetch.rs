use std::sync::Once;
use std::time::Duration;

use job_board_engine::{FailureKind, FetchSettings, JobSource, ReqwestSource};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(board_logging::initialize_for_tests);
}

const FEED: &str = r#"[
  {"title": "Software Engineer", "location": "Sydney", "job_type": "Full time",
   "date_posted": "2024-06-01", "summary": "About the role\n- Ship code"},
  "stray string",
  {"title": "Barista", "summary": ["Pull shots", "Smile"]}
]"#;

#[tokio::test]
async fn source_returns_jobs_and_metadata() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED, "application/json"))
        .mount(&server)
        .await;

    let url = format!("{}/jobs.json", server.uri());
    let source = ReqwestSource::new(url.clone(), FetchSettings::default());

    let output = source.load().await.expect("load ok");
    assert_eq!(source.location(), url);
    assert_eq!(output.metadata.final_location, url);
    assert_eq!(output.metadata.skipped_entries, 1);
    assert_eq!(output.metadata.byte_len, FEED.len() as u64);
    assert_eq!(output.jobs.len(), 2);
    assert_eq!(output.jobs[0].title, "Software Engineer");
    assert_eq!(output.jobs[1].title, "Barista");
}

#[tokio::test]
async fn source_fails_on_http_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(format!("{}/missing", server.uri()), FetchSettings::default());

    let err = source.load().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn source_times_out_on_slow_response() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw("[]", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let source = ReqwestSource::new(format!("{}/slow", server.uri()), settings);

    let err = source.load().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn source_rejects_too_large_feed() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("[1234567890]"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let source = ReqwestSource::new(format!("{}/large", server.uri()), settings);

    let err = source.load().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(12)
        }
    );
}

#[tokio::test]
async fn source_rejects_html_pages() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(format!("{}/page", server.uri()), FetchSettings::default());

    let err = source.load().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_json_is_reported() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[{\"title\":", "application/json"))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(format!("{}/broken", server.uri()), FetchSettings::default());

    let err = source.load().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedJson);
}

#[tokio::test]
async fn redirect_loop_stops_at_limit() {
    init_logging();
    let server = MockServer::start().await;
    let looped = format!("{}/loop", server.uri());
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", looped.as_str()))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 2,
        ..FetchSettings::default()
    };
    let source = ReqwestSource::new(looped.clone(), settings);

    let err = source.load().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn redirect_within_limit_reports_final_location() {
    init_logging();
    let server = MockServer::start().await;
    let target = format!("{}/jobs.json", server.uri());
    Mock::given(method("GET"))
        .and(path("/old-feed"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", target.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(format!("{}/old-feed", server.uri()), FetchSettings::default());

    let output = source.load().await.expect("load ok");
    assert_eq!(output.metadata.final_location, target);
    assert!(output.jobs.is_empty());
}
