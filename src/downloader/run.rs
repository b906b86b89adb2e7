//! The download loop: one pass over the catalog, one request at a time.

use std::path::Path;

use crate::error::{Error, Result, SkipReason};
use crate::selection::select_version;
use crate::types::{ApiDefinition, Event, ItemOutcome, ItemStatus, RunSummary};
use crate::utils::output_path;

use super::CatalogDownloader;

impl CatalogDownloader {
    /// Download every API in the catalog into `<output_root>/<prefix>/`
    ///
    /// Entries are processed in catalog order. A skipped or failed entry is
    /// recorded in the summary and the loop moves on; nothing is retried.
    ///
    /// An empty catalog is not an error: the summary comes back with
    /// `catalog_size == 0` and no directory is created.
    ///
    /// # Errors
    ///
    /// Only whole-run failures are returned: the catalog cannot be fetched or
    /// parsed, or the destination directory cannot be created.
    pub async fn run(&self) -> Result<RunSummary> {
        // Callers report the returned error; keep the library quiet about it
        let catalog = self.fetch_catalog().await.inspect_err(|e| {
            tracing::debug!(
                url = %self.config.base_url,
                error = %e,
                "failed to fetch enumeration endpoint"
            );
        })?;

        let directory = self.config.output_dir();
        let catalog_size = catalog.results.len();

        if catalog_size == 0 {
            tracing::info!(url = %self.config.base_url, "no API definitions in catalog");
            self.emit_event(Event::NothingFound);
            return Ok(RunSummary {
                catalog_size,
                directory,
                outcomes: Vec::new(),
            });
        }

        tracing::info!(count = catalog_size, "catalog fetched");
        self.emit_event(Event::CatalogFetched {
            count: catalog_size,
        });

        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create output directory '{}': {}",
                    directory.display(),
                    e
                ),
            ))
        })?;

        let mut outcomes = Vec::with_capacity(catalog_size);
        for api in &catalog.results {
            let status = self.process_api(api, &directory).await;
            outcomes.push(ItemOutcome {
                name: api.name.clone(),
                status,
            });
        }

        let summary = RunSummary {
            catalog_size,
            directory,
            outcomes,
        };

        tracing::info!(
            saved = summary.saved(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            directory = %summary.directory.display(),
            "catalog run finished"
        );
        self.emit_event(Event::Completed {
            saved: summary.saved(),
            directory: summary.directory.clone(),
        });

        Ok(summary)
    }

    /// Select, fetch and save a single API definition
    async fn process_api(&self, api: &ApiDefinition, directory: &Path) -> ItemStatus {
        if api.versions.is_empty() {
            return self.skip(api, SkipReason::NoVersions);
        }

        let Some(version) = select_version(&api.versions) else {
            return self.skip(api, SkipReason::NoSelectableVersion);
        };

        let Some(url) = version.open_api_url() else {
            return self.skip(api, SkipReason::MissingOpenApiUrl);
        };

        tracing::info!(name = %api.name, url, "downloading OpenAPI document");
        self.emit_event(Event::Downloading {
            name: api.name.clone(),
            url: url.to_string(),
        });

        let body = match self.fetcher.get_text(url).await {
            Ok(body) => body,
            Err(e) => {
                return self.fail(api, format!("failed to fetch OpenAPI spec: {e}"));
            }
        };

        let path = output_path(directory, &self.config.prefix, &api.name);
        if let Err(e) = tokio::fs::write(&path, body.as_bytes()).await {
            return self.fail(
                api,
                format!("failed to save file '{}': {}", path.display(), e),
            );
        }

        tracing::info!(name = %api.name, path = %path.display(), "saved OpenAPI document");
        self.emit_event(Event::Saved {
            name: api.name.clone(),
            path: path.clone(),
        });
        ItemStatus::Saved { path }
    }

    fn skip(&self, api: &ApiDefinition, reason: SkipReason) -> ItemStatus {
        tracing::debug!(name = %api.name, reason = %reason, "skipping API");
        self.emit_event(Event::skipped(&api.name, reason));
        ItemStatus::Skipped { reason }
    }

    fn fail(&self, api: &ApiDefinition, error: String) -> ItemStatus {
        tracing::debug!(name = %api.name, error = %error, "API download failed");
        self.emit_event(Event::Failed {
            name: api.name.clone(),
            error: error.clone(),
        });
        ItemStatus::Failed { error }
    }
}
