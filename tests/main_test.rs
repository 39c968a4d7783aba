mod server;

use pagegrade::cli::Cli;
use pagegrade::run;
use server::get_test_server_url;
use std::fs;
use tempfile::tempdir;

fn args(url: Option<&str>) -> Cli {
    Cli {
        url: url.map(str::to_string),
        html: None,
        deep: false,
        depth: 2,
        max_pages: 10,
        delay_ms: 0,
        timeout: 5,
        crawl_timeout: None,
        output: "text".to_string(),
        save: None,
        verbose: false,
        config: None,
    }
}

#[tokio::test]
async fn test_missing_url_and_html() {
    let result = run(args(None)).await;
    assert!(result.is_err(), "Should fail without a content source");
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Either a URL or an --html file must be provided")
    );
}

#[tokio::test]
async fn test_missing_html_file() {
    let result = run(Cli {
        html: Some("/definitely/not/here.html".to_string()),
        ..args(None)
    })
    .await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read HTML file")
    );
}

#[tokio::test]
async fn test_deep_crawl_requires_url() {
    let result = run(Cli {
        deep: true,
        ..args(None)
    })
    .await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("A deep crawl needs a starting URL")
    );
}

#[tokio::test]
async fn test_single_audit_of_blocked_page_surfaces_reason() {
    let base_url = get_test_server_url().await;
    let result = run(args(Some(&format!("{}/forbidden", base_url)))).await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(
        message.contains("blocked automated access"),
        "unexpected message: {}",
        message
    );
}

#[tokio::test]
async fn test_single_audit_saves_json_report() {
    let base_url = get_test_server_url().await;
    let dir = tempdir().unwrap();
    let report_path = dir.path().join("audit.json");

    run(Cli {
        output: "json".to_string(),
        save: Some(report_path.to_str().unwrap().to_string()),
        ..args(Some(&format!("{}/about", base_url)))
    })
    .await
    .expect("audit should succeed");

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved["elements"]["title"], "About");
    assert!(saved["score"].as_u64().unwrap() <= 100);
}

#[tokio::test]
async fn test_deep_crawl_saves_site_report() {
    let base_url = get_test_server_url().await;
    let dir = tempdir().unwrap();
    let report_path = dir.path().join("site.json");

    run(Cli {
        deep: true,
        depth: 1,
        max_pages: 3,
        save: Some(report_path.to_str().unwrap().to_string()),
        ..args(Some(&base_url))
    })
    .await
    .expect("crawl should succeed");

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved["crawl_stats"]["pages_crawled"], 3);
    assert_eq!(saved["crawl_stats"]["actual_depth"], 1);
    assert_eq!(saved["pages"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_deep_crawl_with_no_reachable_pages_fails() {
    let base_url = get_test_server_url().await;
    let result = run(Cli {
        deep: true,
        ..args(Some(&format!("{}/server-error", base_url)))
    })
    .await;

    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("No pages were successfully crawled")
    );
}
