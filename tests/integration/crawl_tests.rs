//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use cochrane_crawler::config::Config;
use cochrane_crawler::crawler::{run_crawl, Crawler};
use cochrane_crawler::{ConfigError, CrawlError};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, output_path: &str) -> Config {
    let mut config = Config::default();
    config.crawler.seed_url = format!("{}/topics", base_url);
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.site.origin = base_url.to_string();
    config.output.path = output_path.to_string();
    config
}

fn topics_page(topics: &[(&str, String)]) -> String {
    let items: String = topics
        .iter()
        .map(|(name, url)| {
            format!(
                r#"<li class="browse-by-list-item"><a href="{}"><button>{}</button></a></li>"#,
                url, name
            )
        })
        .collect();
    format!(
        r#"<html><body><ul class="browse-by-list">{}</ul></body></html>"#,
        items
    )
}

fn review(slug: &str) -> String {
    format!(
        r#"<div class="search-results-item">
            <div class="search-results-item-body">
                <h3 class="result-title"><a href="/cdsr/doi/{slug}">Review {slug}</a></h3>
                <div class="search-result-authors"><div>Author {slug}</div></div>
            </div>
            <div class="search-result-metadata-block">
                <div class="search-result-date"><div>1 March 2022</div></div>
            </div>
        </div>"#,
        slug = slug
    )
}

fn listing_page(slugs: &[&str], pagination: &[(String, bool)]) -> String {
    let reviews: String = slugs.iter().map(|s| review(s)).collect();
    let items: String = pagination
        .iter()
        .map(|(url, active)| {
            format!(
                r#"<li class="pagination-page-list-item{}"><a href="{}">p</a></li>"#,
                if *active { " active" } else { "" },
                url
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="search-results">{}</div><ul class="pagination-page-list">{}</ul></body></html>"#,
        reviews, items
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_topics() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/topics",
        topics_page(&[
            ("Allergy &amp; intolerance", format!("{}/topic/a", base_url)),
            ("Blood disorders", format!("{}/topic/b", base_url)),
        ]),
    )
    .await;

    // Topic A: a single page with two reviews
    mount_page(&mock_server, "/topic/a", listing_page(&["a1", "a2"], &[])).await;

    // Topic B: front page plus one sub-page, three reviews in total
    mount_page(
        &mock_server,
        "/topic/b",
        listing_page(
            &["b1", "b2"],
            &[
                (format!("{}/topic/b", base_url), true),
                (format!("{}/topic/b/page/2", base_url), false),
            ],
        ),
    )
    .await;
    mount_page(&mock_server, "/topic/b/page/2", listing_page(&["b3"], &[])).await;

    let output = NamedTempFile::new().expect("Failed to create temp file");
    let config = create_test_config(&base_url, output.path().to_str().unwrap());

    let stats = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(stats.topics_discovered, 2);
    assert_eq!(stats.pages_fetched, 3);
    assert!(stats.dropped_urls.is_empty());

    let content = std::fs::read_to_string(output.path()).expect("Failed to read output");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5, "Unexpected output:\n{}", content);

    for line in &lines {
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields.len(), 5, "Bad line: {}", line);
        assert!(
            fields[1] == "Allergy & intolerance" || fields[1] == "Blood disorders",
            "Unexpected topic in line: {}",
            line
        );
    }

    // Topic A is written first, front page first within a topic
    assert_eq!(
        lines[0],
        format!(
            "{}/cdsr/doi/a1|Allergy & intolerance|Review a1|Author a1|1 March 2022",
            base_url
        )
    );
    assert!(lines[1].contains("|Review a2|"));
    assert!(lines[2].contains("|Blood disorders|Review b1|"));
    assert!(lines[4].contains("|Blood disorders|Review b3|"));
}

#[tokio::test]
async fn test_failing_sub_page_dropped_after_three_rounds() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/topics",
        topics_page(&[("Cancer", format!("{}/topic/c", base_url))]),
    )
    .await;
    mount_page(
        &mock_server,
        "/topic/c",
        listing_page(
            &["c1"],
            &[
                (format!("{}/topic/c", base_url), true),
                (format!("{}/topic/c/page/2", base_url), false),
                (format!("{}/topic/c/page/3", base_url), false),
            ],
        ),
    )
    .await;
    mount_page(&mock_server, "/topic/c/page/3", listing_page(&["c3"], &[])).await;

    // Page 2 always fails and must be requested exactly once per round
    Mock::given(method("GET"))
        .and(path("/topic/c/page/2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, "unused.txt");
    let crawler = Crawler::new(&config).expect("Failed to create crawler");
    let report = crawler.crawl().await.expect("Crawl failed");

    assert_eq!(
        report.stats.dropped_urls,
        [format!("{}/topic/c/page/2", base_url)]
    );
    let titles: Vec<String> = report.records.filter_map(|r| r.title).collect();
    assert_eq!(titles, ["Review c1", "Review c3"]);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_flaky_sub_page_recovered_in_later_round() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/topics",
        topics_page(&[("Dentistry", format!("{}/topic/d", base_url))]),
    )
    .await;
    mount_page(
        &mock_server,
        "/topic/d",
        listing_page(
            &["d1"],
            &[
                (format!("{}/topic/d", base_url), true),
                (format!("{}/topic/d/page/2", base_url), false),
            ],
        ),
    )
    .await;

    // First request fails, the next one succeeds
    Mock::given(method("GET"))
        .and(path("/topic/d/page/2"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/topic/d/page/2", listing_page(&["d2"], &[])).await;

    let config = create_test_config(&base_url, "unused.txt");
    let crawler = Crawler::new(&config).expect("Failed to create crawler");
    let report = crawler.crawl().await.expect("Crawl failed");

    assert!(report.stats.dropped_urls.is_empty());
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_unreachable_topics_index_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/topics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let output = NamedTempFile::new().expect("Failed to create temp file");
    let config = create_test_config(&base_url, output.path().to_str().unwrap());

    let err = run_crawl(config).await.unwrap_err();
    match err {
        CrawlError::TopicsIndexFetch { source, .. } => assert_eq!(source.status, Some(500)),
        other => panic!("Unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_invalid_config_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = NamedTempFile::new().expect("Failed to create temp file");
    let mut config = create_test_config(&base_url, output.path().to_str().unwrap());
    config.crawler.max_rounds = 0;

    let err = run_crawl(config).await.unwrap_err();
    assert!(
        matches!(err, CrawlError::Config(ConfigError::Validation(_))),
        "Unexpected error: {}",
        err
    );

    mock_server.verify().await;
}

#[tokio::test]
async fn test_review_without_href_keeps_title_authors_and_date() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/topics",
        topics_page(&[("Neonatal care", format!("{}/topic/n", base_url))]),
    )
    .await;
    let listing = r#"<html><body><div class="search-results">
        <div class="search-results-item">
            <div class="search-results-item-body">
                <h3 class="result-title"><a>Real title</a></h3>
                <div class="search-result-authors"><div>Doe J</div></div>
            </div>
            <div class="search-result-metadata-block">
                <div class="search-result-date"><div>1 Jan 2020</div></div>
            </div>
        </div>
    </div></body></html>"#;
    mount_page(&mock_server, "/topic/n", listing.to_string()).await;

    let output = NamedTempFile::new().expect("Failed to create temp file");
    let config = create_test_config(&base_url, output.path().to_str().unwrap());
    run_crawl(config).await.expect("Crawl failed");

    let content = std::fs::read_to_string(output.path()).expect("Failed to read output");
    assert_eq!(
        content,
        format!("{}|Neonatal care|Real title|Doe J|1 Jan 2020\n", base_url)
    );
}

#[tokio::test]
async fn test_capped_in_flight_fetches_every_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/topics",
        topics_page(&[("Eyes and vision", format!("{}/topic/e", base_url))]),
    )
    .await;

    let mut pagination = vec![(format!("{}/topic/e", base_url), true)];
    for n in 2..=6 {
        let page_path = format!("/topic/e/page/{}", n);
        pagination.push((format!("{}{}", base_url, page_path), false));
        let slug = format!("e{}", n);
        mount_page(&mock_server, &page_path, listing_page(&[slug.as_str()], &[])).await;
    }
    mount_page(&mock_server, "/topic/e", listing_page(&["e1"], &pagination)).await;

    let mut config = create_test_config(&base_url, "unused.txt");
    config.crawler.max_in_flight = Some(2);
    let crawler = Crawler::new(&config).expect("Failed to create crawler");
    let report = crawler.crawl().await.expect("Crawl failed");

    assert_eq!(report.stats.pages_fetched, 6);
    let mut titles: Vec<String> = report.records.filter_map(|r| r.title).collect();
    titles.sort();
    assert_eq!(
        titles,
        ["Review e1", "Review e2", "Review e3", "Review e4", "Review e5", "Review e6"]
    );
}
