//! Shared test helpers for creating CatalogDownloader instances in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

use crate::config::Config;
use crate::downloader::CatalogDownloader;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;

pub(crate) const BASE_URL: &str = "https://vendor.test/specs";

/// Canned response for one URL
#[derive(Clone, Debug)]
pub(crate) enum FakeResponse {
    Body(String),
    Status(u16),
}

/// In-memory [`Fetcher`] that serves canned responses and records every request.
/// URLs without a canned response answer 404.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    responses: Mutex<HashMap<String, FakeResponse>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn respond(&self, url: &str, response: FakeResponse) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
        self
    }

    pub(crate) fn body(&self, url: &str, body: &str) -> &Self {
        self.respond(url, FakeResponse::Body(body.to_string()))
    }

    pub(crate) fn status(&self, url: &str, status: u16) -> &Self {
        self.respond(url, FakeResponse::Status(status))
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(FakeResponse::Body(body)) => Ok(body),
            Some(FakeResponse::Status(status)) => Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            }),
            None => Err(Error::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Helper to create a test CatalogDownloader writing under a fresh tempdir.
/// Returns the downloader, its fake fetcher and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader(
    prefix: &str,
) -> (CatalogDownloader, Arc<FakeFetcher>, tempfile::TempDir) {
    create_test_downloader_with(prefix, |_| {})
}

/// Like [`create_test_downloader`], with a hook to adjust the config first
pub(crate) fn create_test_downloader_with(
    prefix: &str,
    adjust: impl FnOnce(&mut Config),
) -> (CatalogDownloader, Arc<FakeFetcher>, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let mut config = Config {
        base_url: BASE_URL.to_string(),
        prefix: prefix.to_string(),
        output_root: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    adjust(&mut config);
    let fetcher = Arc::new(FakeFetcher::default());
    let downloader = CatalogDownloader::with_fetcher(config, fetcher.clone()).unwrap();
    (downloader, fetcher, temp_dir)
}

/// Build a catalog JSON body from `(name, versions_json)` pairs
pub(crate) fn catalog_json(entries: &[(&str, &str)]) -> String {
    let results: Vec<String> = entries
        .iter()
        .map(|(name, versions)| format!(r#"{{"name": "{name}", "versions": {versions}}}"#))
        .collect();
    format!(r#"{{"results": [{}]}}"#, results.join(","))
}

/// Drain every event currently buffered in a receiver
pub(crate) fn drain_events(
    rx: &mut tokio::sync::broadcast::Receiver<crate::types::Event>,
) -> Vec<crate::types::Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Log sink for a thread-local `tracing` subscriber; clones share one buffer
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a `fmt` subscriber at `level` for the current thread
    pub(crate) fn install(&self, level: tracing::Level) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
