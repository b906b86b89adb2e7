//! Enumeration endpoint fetching and parsing.

use crate::error::Result;
use crate::types::CatalogResponse;

use super::CatalogDownloader;

impl CatalogDownloader {
    /// Fetch and parse the catalog from the configured base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unreachable, answers with a
    /// non-success status, or the body is not a catalog JSON document.
    pub async fn fetch_catalog(&self) -> Result<CatalogResponse> {
        let url = &self.config.base_url;
        tracing::debug!(url = %url, "fetching enumeration endpoint");

        let body = self.fetcher.get_text(url).await?;
        let catalog: CatalogResponse = serde_json::from_str(&body)?;

        tracing::debug!(url = %url, count = catalog.results.len(), "catalog parsed");
        Ok(catalog)
    }
}
