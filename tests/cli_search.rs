//! End-to-end tests for the flipkart-live command.
//!
//! A wiremock server stands in for the result pages; the binary is pointed at
//! it through a temporary config file.

use flipkart_live::AppConfig;
use std::process::{Command, Output};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_flipkart-live");

const LAPTOP_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="DOjaWF">
  <div class="cPHDOP product-card">
    <a class="wjcEIp" title="HP 15s Intel Core i3" href="/hp-15s/p/itm1">
      <img src="/images/hp-15s.jpeg">
    </a>
    <a class="WKTcLC title-link" href="/hp-15s/p/itm1">HP 15s Intel Core i3 12th Gen</a>
    <div class="Nx9bqj">₹35,990</div>
    <div class="yRaY8j">₹47,000</div>
    <div class="XQDdHH">4.1 ★</div>
  </div>
  <div class="cPHDOP product-card">
    <div class="Nx9bqj">₹999</div>
  </div>
</div>
</body>
</html>"#;

fn write_config(dir: &tempfile::TempDir, base_url: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    let body = format!(
        "[scrape]\nbase_url = \"{base_url}\"\nrequest_delay_ms = [0, 0]\ntimeout_seconds = 5\n"
    );
    std::fs::write(&path, body).expect("write config");
    path
}

async fn run_bin(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(BIN)
            .args(&args)
            .env_remove("RUST_LOG")
            .output()
            .expect("binary runs")
    })
    .await
    .expect("join")
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_success_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "hp laptop"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LAPTOP_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, &server.uri());

    let output = run_bin(vec![
        "--config".into(),
        config.display().to_string(),
        "-n".into(),
        "5".into(),
        "hp laptop".into(),
    ])
    .await;

    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "clean run logged: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["success"], true);
    assert_eq!(json["query"], "hp laptop");
    assert_eq!(json["source"], "flipkart_live");
    assert_eq!(json["total"], 1);

    let product = &json["products"][0];
    assert_eq!(product["title"], "HP 15s Intel Core i3 12th Gen");
    assert_eq!(product["sellingPrice"], 35990);
    assert!(product.get("mrp").is_none());
    assert_eq!(product["rating"], 4.1);
    assert_eq!(
        product["imageUrl"],
        format!("{}/images/hp-15s.jpeg", server.uri())
    );
    assert_eq!(product["category"], "laptop");
    assert_eq!(product["brand"], "HP");
    assert_eq!(product["inStock"], true);
    assert_eq!(product["availability"], "In Stock");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_site_prints_failure_envelope_and_exits_zero() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|addr| addr.port())
        .expect("free port");

    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, &format!("http://127.0.0.1:{port}"));

    let output = run_bin(vec![
        "--config".into(),
        config.display().to_string(),
        "-n".into(),
        "5".into(),
        "redmi".into(),
    ])
    .await;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["products"], serde_json::json!([]));
    assert_eq!(json["query"], "redmi");
    assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error scraping Flipkart"));
}

#[test]
fn missing_query_prints_usage_and_fails() {
    let output = Command::new(BIN).output().expect("binary runs");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn extra_positional_argument_fails() {
    let output = Command::new(BIN)
        .args(["redmi", "note"])
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_config_file_fails_before_searching() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scrape]\nmax_pages = 0\n").expect("write config");

    let output = Command::new(BIN)
        .args(["--config", &path.display().to_string(), "redmi"])
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_pages"));
}

#[test]
fn config_file_feeds_scrape_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "http://127.0.0.1:9");
    let scrape = AppConfig::from_file(&path)
        .and_then(|c| c.to_scrape_config())
        .expect("valid config");
    assert_eq!(scrape.base_url, "http://127.0.0.1:9");
    assert_eq!(scrape.request_delay_ms, (0, 0));
    assert_eq!(scrape.max_results, 25);
}
