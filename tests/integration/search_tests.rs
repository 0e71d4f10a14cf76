//! Integration tests for a full search run
//!
//! These tests use wiremock to stand in for both search APIs and for the
//! sites they link to, and drive the run end-to-end through the public API.

use fossick::config::{FileConfig, SearchConfig, SearchOptions};
use fossick::output::{sink_for, DownloadSink, OutputSink, RunSummary};
use fossick::pipeline::build_probe_client;
use fossick::{AdapterError, FossickError, HttpStatusOutcome, ResultAggregator, SourceEngine};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates settings whose endpoints point at the mock server
fn create_test_settings(server: &MockServer, dir: &TempDir) -> FileConfig {
    let mut settings = FileConfig::default();
    settings.web.endpoint = format!("{}/bing/v7.0/search", server.uri());
    settings.general.endpoint = format!("{}/customsearch/v1", server.uri());
    settings.http.search_timeout_secs = 5;
    settings.http.probe_timeout_secs = 5;
    settings.output.csv_path = dir
        .path()
        .join("fossick-results.csv")
        .to_string_lossy()
        .into_owned();
    settings.output.download_dir = dir.path().join("downloads").to_string_lossy().into_owned();
    settings
}

fn web_only_options(query: &str) -> SearchOptions {
    SearchOptions {
        search_query: query.to_string(),
        bing_key: Some("bing-key".to_string()),
        ..SearchOptions::default()
    }
}

fn both_engines_options(query: &str) -> SearchOptions {
    SearchOptions {
        search_query: query.to_string(),
        bing_key: Some("bing-key".to_string()),
        google_api: Some("google-key".to_string()),
        google_cse: Some("engine-id".to_string()),
        ..SearchOptions::default()
    }
}

/// Mounts a Bing response listing the given paths on the mock server
async fn mount_bing_results(server: &MockServer, paths: &[&str]) {
    let value: Vec<serde_json::Value> = paths
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": format!("Page {}", p),
                "url": format!("{}{}", server.uri(), p),
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/bing/v7.0/search"))
        .and(header("Ocp-Apim-Subscription-Key", "bing-key"))
        .and(query_param("q", "test query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_type": "SearchResponse",
            "webPages": {
                "totalEstimatedMatches": paths.len(),
                "value": value,
            }
        })))
        .mount(server)
        .await;
}

/// Mounts the link targets: `/page-a` answers 200, `/page-b` answers 404
async fn mount_link_targets(server: &MockServer) {
    Mock::given(path("/page-a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>a</html>"))
        .mount(server)
        .await;

    Mock::given(path("/page-b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_web_only_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_bing_results(&server, &["/page-a", "/page-b"]).await;
    mount_link_targets(&server).await;

    let config = SearchConfig::new(
        web_only_options("test query"),
        create_test_settings(&server, &dir),
    )
    .unwrap();

    let aggregator = ResultAggregator::from_config(&config).unwrap();
    assert_eq!(aggregator.engines(), vec![SourceEngine::Web]);

    let report = aggregator.run(config.query()).await.unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.results.len(), 2);
    assert!(report
        .results
        .iter()
        .all(|r| r.source_engine() == SourceEngine::Web && r.is_verified()));

    assert_eq!(report.results[0].url(), format!("{}/page-a", server.uri()));
    assert_eq!(report.results[0].status(), Some(&HttpStatusOutcome::Status(200)));
    assert_eq!(report.results[1].status(), Some(&HttpStatusOutcome::Status(404)));
}

#[tokio::test]
async fn test_rejected_general_credentials_keep_web_results() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_bing_results(&server, &["/page-a"]).await;
    mount_link_targets(&server).await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "code": 401,
                "message": "Request is missing required authentication credential.",
                "status": "UNAUTHENTICATED"
            }
        })))
        .mount(&server)
        .await;

    let config = SearchConfig::new(
        both_engines_options("test query"),
        create_test_settings(&server, &dir),
    )
    .unwrap();

    let aggregator = ResultAggregator::from_config(&config).unwrap();
    assert_eq!(
        aggregator.engines(),
        vec![SourceEngine::Web, SourceEngine::General]
    );

    let report = aggregator.run(config.query()).await.unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0],
        AdapterError::Auth {
            engine: SourceEngine::General,
            status: 401,
            ..
        }
    ));

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].source_engine(), SourceEngine::Web);
    assert!(!report
        .results
        .iter()
        .any(|r| r.source_engine() == SourceEngine::General));
}

#[tokio::test]
async fn test_all_engines_failing_is_no_results() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/bing/v7.0/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "code": 429, "message": "Quota exceeded for quota metric 'Queries'" }
        })))
        .mount(&server)
        .await;

    let config = SearchConfig::new(
        both_engines_options("test query"),
        create_test_settings(&server, &dir),
    )
    .unwrap();

    let result = ResultAggregator::from_config(&config)
        .unwrap()
        .run(config.query())
        .await;

    match result {
        Err(FossickError::NoResults(reasons)) => {
            assert!(reasons.contains("Bing"));
            assert!(reasons.contains("Google"));
            assert!(!reasons.contains("google-key"));
        }
        other => panic!("expected NoResults, got {:?}", other.map(|r| r.results.len())),
    }
}

#[tokio::test]
async fn test_empty_results_are_not_an_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/bing/v7.0/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_type": "SearchResponse"
        })))
        .mount(&server)
        .await;

    let config = SearchConfig::new(
        web_only_options("test query"),
        create_test_settings(&server, &dir),
    )
    .unwrap();

    let report = ResultAggregator::from_config(&config)
        .unwrap()
        .run(config.query())
        .await
        .unwrap();

    assert!(report.results.is_empty());
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_csv_output_and_downloads() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_bing_results(&server, &["/page-a", "/page-b"]).await;
    mount_link_targets(&server).await;

    let options = SearchOptions {
        write_csv: true,
        download: true,
        ..web_only_options("test query")
    };
    let config = SearchConfig::new(options, create_test_settings(&server, &dir)).unwrap();

    let report = ResultAggregator::from_config(&config)
        .unwrap()
        .run(config.query())
        .await
        .unwrap();

    let mut sink = sink_for(&config);
    sink.write(&report.results).unwrap();

    let csv_path = dir.path().join("fossick-results.csv");
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        vec!["title", "url", "source_engine", "status"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Page /page-a");
    assert_eq!(&rows[0][2], "Bing");
    assert_eq!(&rows[0][3], "200");
    assert_eq!(&rows[1][3], "404");

    let client = build_probe_client(&config.settings().http).unwrap();
    let downloader = DownloadSink::new(client, config.download_dir());
    let downloads = downloader.download_all(&report.results).await.unwrap();

    assert_eq!(downloads.saved, 1);
    assert_eq!(downloads.skipped, 1);
    assert_eq!(downloads.failed, 0);

    let saved: Vec<_> = std::fs::read_dir(config.download_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ends_with("-page-a"));

    let summary = RunSummary::from_results(chrono::Utc::now(), &report.results, 0)
        .with_downloads(downloads);
    assert_eq!(summary.total_links, 2);
    assert!(summary
        .format_lines()
        .contains(&"Downloads: 1 saved, 0 failed, 1 skipped".to_string()));
}

#[test]
fn test_missing_credentials_rejected() {
    let options = SearchOptions {
        search_query: "test query".to_string(),
        google_api: Some("only-half".to_string()),
        ..SearchOptions::default()
    };

    let result = SearchConfig::new(options, FileConfig::default());
    assert!(matches!(
        result,
        Err(fossick::ConfigError::MissingEngine)
    ));
}
