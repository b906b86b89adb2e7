//! Catalog fixtures and mock-server helpers

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openapi_sleuth::{CatalogDownloader, Config};

/// Path the mock enumeration endpoint is served from
pub const CATALOG_PATH: &str = "/public/api/spec/v1/specs";

/// Minimal OpenAPI document served for successful downloads
pub const PETSTORE_SPEC: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Petstore", "version": "1.0.0"},
  "paths": {}
}"#;

/// Version entry JSON pointing at `url` on the mock server
pub fn latest_version(version: u32, url: &str) -> String {
    format!(r#"{{"stage": "LATEST", "version": {version}, "openApi": "{url}"}}"#)
}

/// Catalog body from `(name, versions_json_array)` pairs
pub fn catalog_body(entries: &[(&str, String)]) -> String {
    let results: Vec<String> = entries
        .iter()
        .map(|(name, versions)| format!(r#"{{"name": "{name}", "versions": {versions}}}"#))
        .collect();
    format!(r#"{{"results": [{}]}}"#, results.join(","))
}

/// Serve `body` as the catalog with status 200
pub async fn mount_catalog(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Serve a document at `doc_path` with the given status and body
pub async fn mount_document(server: &MockServer, doc_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(doc_path))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Downloader pointed at the mock server, writing into a fresh tempdir
pub fn downloader_for(server: &MockServer, prefix: &str) -> (CatalogDownloader, TempDir) {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = Config {
        base_url: format!("{}{}", server.uri(), CATALOG_PATH),
        prefix: prefix.to_string(),
        output_root: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let downloader = CatalogDownloader::new(config).expect("failed to create downloader");
    (downloader, temp_dir)
}
