//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a fake business directory and run
//! the full crawl cycle end-to-end into a temporary CSV file.

use pymes_scraper::config::{Config, CrawlRequest};
use pymes_scraper::crawler::run_crawl;
use pymes_scraper::logging::file_layer;
use pymes_scraper::PymesError;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MUNICIPALITY: &str = "xalapa-65eb";
const HEADER: &str = "Razón social,Calle,Número,Colonia,Ciudad,Estado,País,CP";

/// Creates a test configuration pointed at the mock server
fn create_test_config(origin: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.origin = origin.to_string();
    config.http.timeout_secs = 5;
    config.output.csv_path = dir.path().join("empresas.csv").display().to_string();
    config.output.log_path = dir.path().join("download.log").display().to_string();
    config
}

fn csv_path(dir: &TempDir) -> PathBuf {
    dir.path().join("empresas.csv")
}

fn read_rows(dir: &TempDir) -> Vec<String> {
    std::fs::read_to_string(csv_path(dir))
        .expect("Failed to read CSV")
        .lines()
        .map(str::to_string)
        .collect()
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn listing_page(detail_paths: &[&str]) -> String {
    let rows: String = detail_paths
        .iter()
        .map(|p| format!(r#"<tr><td><a href="{}">Empresa</a></td><td>Xalapa</td></tr>"#, p))
        .collect();
    format!(
        r#"<html><body>
        <h2>Empresas en Xalapa</h2>
        <table class="items"><thead><tr><th>Nombre</th><th>Ciudad</th></tr></thead>
        <tbody>{}</tbody></table>
        </body></html>"#,
        rows
    )
}

/// Address block fragments; `with_number` selects the 15-fragment layout
fn address_fragments(street: &str, with_number: bool) -> Vec<String> {
    let mut fragments = vec![format!("{},", street)];
    if with_number {
        fragments.push("42,".to_string());
    }
    fragments.extend(
        [
            "Col. Centro,",
            "Xalapa,",
            "Municipio:",
            "Xalapa",
            "Veracruz,",
            "País:",
            "México,",
            "CP:",
            "91000",
            "Tel:",
            "228 000 0000",
            "Giro:",
            "Comercio",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    fragments
}

fn detail_page(name: &str, fragments: Option<&[String]>) -> String {
    let address_block = match fragments {
        Some(fragments) => {
            let spans: String = fragments
                .iter()
                .map(|f| format!("<span>{}</span>\n", f))
                .collect();
            format!(r#"<div class="icon-box-body">{}</div>"#, spans)
        }
        None => String::new(),
    };
    format!(
        r#"<html><body>
        <h1><span itemprop="name">{}</span></h1>
        <div class="icon-box-body"><p>Descripción de la empresa</p></div>
        {}
        </body></html>"#,
        name, address_block
    )
}

async fn mount_listing(server: &MockServer, page: u32, detail_paths: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/municipio/{}.html", MUNICIPALITY)))
        .and(query_param("Pyme_page", page.to_string()))
        .respond_with(html(listing_page(detail_paths)))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, detail_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(detail_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_and_reduced_layouts() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(&mock_server, 1, &["/pyme/a.html", "/pyme/b.html"]).await;

    let full = address_fragments("Av. Ávila Camacho", true);
    assert_eq!(full.len(), 15);
    mount_detail(&mock_server, "/pyme/a.html", detail_page("Empresa A", Some(full.as_slice()))).await;

    let reduced = address_fragments("Calle Sin Número", false);
    assert_eq!(reduced.len(), 14);
    mount_detail(&mock_server, "/pyme/b.html", detail_page("Empresa B", Some(reduced.as_slice()))).await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 1);
    let stats = run_crawl(&config, &request).await.expect("Crawl failed");

    let rows = read_rows(&dir);
    assert_eq!(
        rows,
        vec![
            HEADER.to_string(),
            "Empresa A,Av. Ávila Camacho,42,Col. Centro,Xalapa,Veracruz,México,91000".to_string(),
            "Empresa B,Calle Sin Número,,Col. Centro,Xalapa,Veracruz,México,91000".to_string(),
        ]
    );
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.listings_seen, 2);
    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.skipped(), 0);
}

#[tokio::test]
async fn test_listing_without_address_block() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(&mock_server, 3, &["/pyme/sin-datos.html"]).await;
    mount_detail(&mock_server, "/pyme/sin-datos.html", detail_page("Sin Datos", None)).await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 3, 3);
    let stats = run_crawl(&config, &request).await.expect("Crawl failed");

    assert_eq!(read_rows(&dir), vec![HEADER.to_string()]);
    assert_eq!(stats.no_data, 1);
    assert_eq!(stats.records_written, 0);
}

#[tokio::test]
async fn test_malformed_detail_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(
        &mock_server,
        1,
        &["/pyme/corto.html", "/pyme/sin-nombre.html", "/pyme/ok.html"],
    )
    .await;

    let short: Vec<String> = vec!["Calle 1,".to_string(), "Centro,".to_string()];
    mount_detail(&mock_server, "/pyme/corto.html", detail_page("Corto", Some(short.as_slice()))).await;
    mount_detail(
        &mock_server,
        "/pyme/sin-nombre.html",
        r#"<html><body><div class="icon-box-body"></div><div class="icon-box-body"></div></body></html>"#
            .to_string(),
    )
    .await;
    let full = address_fragments("Av. Xalapa", true);
    mount_detail(&mock_server, "/pyme/ok.html", detail_page("Correcta", Some(full.as_slice()))).await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 1);
    let stats = run_crawl(&config, &request).await.expect("Crawl failed");

    let rows = read_rows(&dir);
    assert_eq!(rows.len(), 2);
    assert!(rows[1].starts_with("Correcta,Av. Xalapa,42,"));
    assert_eq!(stats.malformed, 2);
    assert_eq!(stats.listings_seen, 3);
}

#[tokio::test]
async fn test_transport_failure_keeps_earlier_rows() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(&mock_server, 1, &["/pyme/1.html", "/pyme/2.html", "/pyme/3.html"]).await;
    for (i, detail_path) in ["/pyme/1.html", "/pyme/2.html", "/pyme/3.html"]
        .iter()
        .enumerate()
    {
        let fragments = address_fragments("Av. Xalapa", true);
        mount_detail(
            &mock_server,
            detail_path,
            detail_page(&format!("Empresa {}", i + 1), Some(fragments.as_slice())),
        )
        .await;
    }

    Mock::given(method("GET"))
        .and(path(format!("/municipio/{}.html", MUNICIPALITY)))
        .and(query_param("Pyme_page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 3);
    let err = run_crawl(&config, &request).await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, PymesError::HttpStatus { status: 503, .. }));

    let rows = read_rows(&dir);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], HEADER);
    assert!(rows[1].starts_with("Empresa 1,"));
    assert!(rows[2].starts_with("Empresa 2,"));
    assert!(rows[3].starts_with("Empresa 3,"));

    // Page 3 is never requested once page 2 failed
    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests
        .iter()
        .any(|r| r.url.query().unwrap_or("").contains("Pyme_page=3")));
}

#[tokio::test]
async fn test_rows_follow_page_order() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(&mock_server, 1, &["/pyme/p1a.html", "/pyme/p1b.html"]).await;
    mount_listing(&mock_server, 2, &["/pyme/p2a.html"]).await;
    for (detail_path, name) in [
        ("/pyme/p1a.html", "Primera"),
        ("/pyme/p1b.html", "Segunda"),
        ("/pyme/p2a.html", "Tercera"),
    ] {
        let fragments = address_fragments("Av. Xalapa", false);
        mount_detail(&mock_server, detail_path, detail_page(name, Some(fragments.as_slice()))).await;
    }

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 2);
    let stats = run_crawl(&config, &request).await.expect("Crawl failed");

    let names: Vec<String> = read_rows(&dir)
        .iter()
        .skip(1)
        .map(|row| row.split(',').next().unwrap_or("").to_string())
        .collect();
    assert_eq!(names, vec!["Primera", "Segunda", "Tercera"]);
    assert_eq!(stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_listing_page_without_table() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/municipio/{}.html", MUNICIPALITY)))
        .respond_with(html("<html><body><p>Sin resultados</p></body></html>".to_string()))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 1);
    let stats = run_crawl(&config, &request).await.expect("Crawl failed");

    assert_eq!(read_rows(&dir), vec![HEADER.to_string()]);
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.listings_seen, 0);
}

#[tokio::test]
async fn test_rerun_regenerates_identical_csv() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(&mock_server, 1, &["/pyme/a.html", "/pyme/b.html"]).await;
    let full = address_fragments("Av. Xalapa", true);
    mount_detail(&mock_server, "/pyme/a.html", detail_page("Tacos, Tortas y Más", Some(full.as_slice()))).await;
    let reduced = address_fragments("Calle 2", false);
    mount_detail(&mock_server, "/pyme/b.html", detail_page("Empresa B", Some(reduced.as_slice()))).await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 1);

    run_crawl(&config, &request).await.expect("First crawl failed");
    let first = std::fs::read(csv_path(&dir)).unwrap();

    run_crawl(&config, &request).await.expect("Second crawl failed");
    let second = std::fs::read(csv_path(&dir)).unwrap();

    assert_eq!(first, second);
    assert_eq!(read_rows(&dir).len(), 3);
    assert!(read_rows(&dir)[1].starts_with("\"Tacos, Tortas y Más\","));
}

#[tokio::test]
async fn test_reversed_range_sends_no_requests() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 2, 1);
    let err = run_crawl(&config, &request).await.unwrap_err();

    assert!(matches!(err, PymesError::Config(_)));
    assert!(!err.is_transport());
    assert!(!csv_path(&dir).exists());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_dead_detail_link_is_skipped() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(&mock_server, 1, &["/pyme/gone.html", "/pyme/ok.html"]).await;
    Mock::given(method("GET"))
        .and(path("/pyme/gone.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    let full = address_fragments("Av. Xalapa", true);
    mount_detail(&mock_server, "/pyme/ok.html", detail_page("Correcta", Some(full.as_slice()))).await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let request = CrawlRequest::new(MUNICIPALITY, 1, 1);
    let stats = run_crawl(&config, &request).await.expect("Crawl failed");

    let rows = read_rows(&dir);
    assert_eq!(rows.len(), 2);
    assert!(rows[1].starts_with("Correcta,"));
    assert_eq!(stats.unavailable, 1);
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.listings_seen, 2);
}

#[tokio::test]
async fn test_download_log_records_skipped_businesses() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_listing(
        &mock_server,
        1,
        &["/pyme/sin-datos.html", "/pyme/corto.html", "/pyme/ok.html"],
    )
    .await;
    mount_detail(&mock_server, "/pyme/sin-datos.html", detail_page("Sin Datos", None)).await;
    let short: Vec<String> = vec!["Calle 1,".to_string(), "Centro,".to_string()];
    mount_detail(&mock_server, "/pyme/corto.html", detail_page("Corto", Some(short.as_slice()))).await;
    let full = address_fragments("Av. Xalapa", true);
    mount_detail(&mock_server, "/pyme/ok.html", detail_page("Correcta", Some(full.as_slice()))).await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let log_path = dir.path().join("download.log");
    std::fs::write(&log_path, "ERROR left over from a previous run\n").unwrap();

    let subscriber = tracing_subscriber::registry().with(file_layer(&log_path).unwrap());
    let guard = tracing::subscriber::set_default(subscriber);

    let request = CrawlRequest::new(MUNICIPALITY, 1, 1);
    run_crawl(&config, &request).await.expect("Crawl failed");
    drop(guard);

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert!(!log.contains("previous run"));
    assert_eq!(lines.len(), 2, "unexpected log: {}", log);

    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("Sin Datos"));

    assert!(lines[1].contains("ERROR"));
    assert!(lines[1].contains("/pyme/corto.html"));
    assert!(lines[1].contains("Corto"));

    assert_eq!(read_rows(&dir).len(), 2);
}
