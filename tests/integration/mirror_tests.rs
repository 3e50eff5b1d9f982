//! Integration tests for the mirror
//!
//! These tests use wiremock to serve a small documentation site and run the
//! full crawl end-to-end into a temporary directory.

use docs_mirror::config::Config;
use docs_mirror::crawler::{Coordinator, CrawlReporter, SkipReason};
use docs_mirror::url::OutputPath;
use docs_mirror::MirrorError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEED_PATH: &str = "/gemini-api/docs";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Started(String),
    Saved(String),
    Skipped(String, SkipReason),
    Aborted(String),
    Completed(usize),
}

/// Reporter that records every event for later assertions
///
/// With `panic_on` set, starting that page panics inside its task.
#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<Event>>,
    panic_on: Option<&'static str>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl CrawlReporter for RecordingReporter {
    fn page_started(&self, url: &Url, _path: &OutputPath) {
        if self.panic_on == Some(url.path()) {
            panic!("reporter failed on {}", url);
        }
        self.push(Event::Started(url.path().to_string()));
    }

    fn page_saved(&self, url: &Url, _file: &Path) {
        self.push(Event::Saved(url.path().to_string()));
    }

    fn page_skipped(&self, url: &Url, reason: &SkipReason) {
        self.push(Event::Skipped(url.path().to_string(), reason.clone()));
    }

    fn run_aborted(&self, reason: &str) {
        self.push(Event::Aborted(reason.to_string()));
    }

    fn run_completed(&self, saved: usize) {
        self.push(Event::Completed(saved));
    }
}

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.crawler.request_delay = 0;
    config.crawler.request_timeout = 5;
    config.output.output_dir = output_dir.to_string_lossy().into_owned();
    config
}

fn seed_html(nav_items: &str) -> String {
    format!(
        r#"<html><head><title>Gemini API</title></head><body>
        <nav class="devsite-book-nav">{}</nav>
        <div role="main"><h1>Gemini API docs</h1></div>
        </body></html>"#,
        nav_items
    )
}

fn page_html(title: &str) -> String {
    format!(
        r#"<html><body>
        <nav class="devsite-book-nav"><a href="/gemini-api/docs/other">Other</a></nav>
        <div role="main"><h1>{}</h1><p>See <a href="https://ai.google.dev/gemini-api/docs/models">models</a>.</p></div>
        </body></html>"#,
        title
    )
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Lists every file under `dir`, relative to it, sorted
fn list_files(dir: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                files.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}

#[tokio::test]
async fn test_duplicate_nav_links_crawled_once() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="/gemini-api/docs/models">Models</a>
               <a href="/gemini-api/docs/models">Models</a>"#,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gemini-api/docs/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html("Models")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path())).unwrap();

    let links = coordinator.discover().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links.iter().next().unwrap().1.document_path(), "models.md");

    let stats = coordinator.run().await.unwrap();
    assert_eq!(stats.discovered, 1);
    assert_eq!(stats.saved, 1);
    assert_eq!(list_files(dir.path()), vec![PathBuf::from("models.md")]);

    let contents = std::fs::read_to_string(dir.path().join("models.md")).unwrap();
    assert!(contents.contains("Models"));
    assert!(contents.contains("[models](https://ai.google.dev/gemini-api/docs/models)"));
    assert!(
        !contents.contains("Other"),
        "navigation leaked into content"
    );
}

#[tokio::test]
async fn test_docs_root_link_written_as_index() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(r#"<a href="/gemini-api/docs/">Overview</a>"#),
    )
    .await;
    mount_page(&server, "/gemini-api/docs/", 200, page_html("Overview")).await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.saved, 1);
    assert_eq!(list_files(dir.path()), vec![PathBuf::from("index.md")]);
}

#[tokio::test]
async fn test_cross_origin_links_excluded() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="https://external-site.com/page">External</a>
               <a href="/gemini-api/docs/quickstart">Quickstart</a>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/gemini-api/docs/quickstart",
        200,
        page_html("Quickstart"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path())).unwrap();

    let links = coordinator.discover().await.unwrap();
    let base = Url::parse(&server.uri()).unwrap();
    assert_eq!(links.len(), 1);
    for (url, _) in links.iter() {
        assert_eq!(url.origin(), base.origin());
    }

    let stats = coordinator.run().await.unwrap();
    assert_eq!(stats.saved, 1);
    assert_eq!(list_files(dir.path()), vec![PathBuf::from("quickstart.md")]);
}

#[tokio::test]
async fn test_not_found_page_skipped_and_run_completes() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="/gemini-api/docs/missing">Missing</a>
               <a href="/gemini-api/docs/models">Models</a>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/gemini-api/docs/missing",
        404,
        "Not Found".to_string(),
    )
    .await;
    mount_page(&server, "/gemini-api/docs/models", 200, page_html("Models")).await;

    let dir = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter::default());
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path()))
        .unwrap()
        .with_reporter(reporter.clone());

    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.saved, 1);
    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(list_files(dir.path()), vec![PathBuf::from("models.md")]);

    let events = reporter.events();
    assert_eq!(
        events,
        vec![
            Event::Started("/gemini-api/docs/missing".to_string()),
            Event::Skipped(
                "/gemini-api/docs/missing".to_string(),
                SkipReason::Fetch("HTTP 404".to_string())
            ),
            Event::Started("/gemini-api/docs/models".to_string()),
            Event::Saved("/gemini-api/docs/models".to_string()),
            Event::Completed(1),
        ]
    );
}

#[tokio::test]
async fn test_missing_navigation_aborts_without_files() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        r#"<html><body><a href="/gemini-api/docs/models">Models</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(&server, "/gemini-api/docs/models", 200, page_html("Models")).await;

    let dir = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter::default());
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path()))
        .unwrap()
        .with_reporter(reporter.clone());

    let result = coordinator.run().await;

    assert!(matches!(
        result,
        Err(MirrorError::NavigationNotFound { .. })
    ));
    assert!(list_files(dir.path()).is_empty());

    let events = reporter.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Aborted(_)));
}

#[tokio::test]
async fn test_seed_fetch_failure_aborts() {
    let server = MockServer::start().await;
    mount_page(&server, SEED_PATH, 500, "boom".to_string()).await;

    let dir = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter::default());
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path()))
        .unwrap()
        .with_reporter(reporter.clone());

    let result = coordinator.run().await;

    match result {
        Err(MirrorError::SeedFetch { reason, .. }) => assert_eq!(reason, "HTTP 500"),
        other => panic!("expected seed fetch failure, got {:?}", other),
    }
    assert!(list_files(dir.path()).is_empty());
    assert!(matches!(reporter.events().as_slice(), [Event::Aborted(_)]));
}

#[tokio::test]
async fn test_page_without_content_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="/gemini-api/docs/blank">Blank</a>
               <a href="/gemini-api/docs/models">Models</a>"#,
        ),
    )
    .await;
    mount_page(&server, "/gemini-api/docs/blank", 200, String::new()).await;
    mount_page(&server, "/gemini-api/docs/models", 200, page_html("Models")).await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.saved, 1);
    assert_eq!(stats.content_missing, 1);
    assert_eq!(list_files(dir.path()), vec![PathBuf::from("models.md")]);
}

#[tokio::test]
async fn test_body_fallback_and_nested_paths() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="/gemini-api/docs/guides/streaming">Streaming</a>
               <a href="/gemini-api/docs/article">Article</a>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/gemini-api/docs/guides/streaming",
        200,
        "<html><body><p>Plain body content</p></body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/gemini-api/docs/article",
        200,
        "<html><body><header>Site header</header><devsite-article-body><p>Article body</p></devsite-article-body></body></html>"
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.saved, 2);
    assert_eq!(
        list_files(dir.path()),
        vec![
            PathBuf::from("article.md"),
            PathBuf::from("guides").join("streaming.md"),
        ]
    );

    let streaming =
        std::fs::read_to_string(dir.path().join("guides").join("streaming.md")).unwrap();
    assert!(streaming.contains("Plain body content"));

    let article = std::fs::read_to_string(dir.path().join("article.md")).unwrap();
    assert!(article.contains("Article body"));
    assert!(!article.contains("Site header"));
}

#[tokio::test]
async fn test_output_root_created() {
    let server = MockServer::start().await;
    mount_page(&server, SEED_PATH, 200, seed_html("")).await;

    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("out");
    let coordinator = Coordinator::new(create_test_config(&server.uri(), &root)).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.discovered, 0);
    assert!(root.is_dir());
}

#[tokio::test]
async fn test_request_delay_respected() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="/gemini-api/docs/a">A</a>
               <a href="/gemini-api/docs/b">B</a>"#,
        ),
    )
    .await;
    mount_page(&server, "/gemini-api/docs/a", 200, page_html("A")).await;
    mount_page(&server, "/gemini-api/docs/b", 200, page_html("B")).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.crawler.request_delay = 100;

    let start = Instant::now();
    let stats = Coordinator::new(config).unwrap().run().await.unwrap();

    // Seed plus two pages: two gaps between three request starts
    assert_eq!(stats.saved, 2);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_concurrent_fetches_save_every_page() {
    let server = MockServer::start().await;
    let nav: String = (0..8)
        .map(|i| format!(r#"<a href="/gemini-api/docs/page-{i}">Page {i}</a>"#))
        .collect();
    mount_page(&server, SEED_PATH, 200, seed_html(&nav)).await;
    for i in 0..8 {
        Mock::given(method("GET"))
            .and(path(format!("/gemini-api/docs/page-{i}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_html(&format!("Page {i}")))
                    .set_delay(Duration::from_millis(20)),
            )
            .mount(&server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.crawler.max_concurrent_fetches = 4;

    let stats = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(stats.discovered, 8);
    assert_eq!(stats.saved, 8);
    assert_eq!(list_files(dir.path()).len(), 8);
}

#[tokio::test]
async fn test_panicking_page_task_counted_as_skip() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        SEED_PATH,
        200,
        seed_html(
            r#"<a href="/gemini-api/docs/boom">Boom</a>
               <a href="/gemini-api/docs/models">Models</a>"#,
        ),
    )
    .await;
    mount_page(&server, "/gemini-api/docs/models", 200, page_html("Models")).await;

    let dir = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter {
        panic_on: Some("/gemini-api/docs/boom"),
        ..RecordingReporter::default()
    });
    let coordinator = Coordinator::new(create_test_config(&server.uri(), dir.path()))
        .unwrap()
        .with_reporter(reporter.clone());

    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.discovered, 2);
    assert_eq!(stats.saved, 1);
    assert_eq!(stats.task_failures, 1);
    assert_eq!(stats.processed(), stats.discovered);
    assert_eq!(list_files(dir.path()), vec![PathBuf::from("models.md")]);

    let events = reporter.events();
    let failed: Vec<&str> = events
        .iter()
        .filter_map(|event| match event {
            Event::Skipped(page, SkipReason::TaskFailed(_)) => Some(page.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec!["/gemini-api/docs/boom"]);
    assert_eq!(events.last(), Some(&Event::Completed(1)));
}
