//! Catalog downloader split into focused submodules.
//!
//! The `CatalogDownloader` struct and its methods are organized by step:
//! - [`catalog`] - Fetching and parsing the enumeration endpoint
//! - [`run`] - The per-item download loop and run summary

mod catalog;
mod run;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::types::Event;

/// One-shot fetcher of a vendor's OpenAPI catalog
///
/// Requests are issued strictly one after another; [`run`](Self::run) awaits
/// each fetch and write before starting the next.
#[derive(Clone)]
pub struct CatalogDownloader {
    /// Configuration (wrapped in Arc for cheap clones)
    pub(crate) config: Arc<Config>,
    /// HTTP GET implementation (trait object for pluggable implementations)
    pub(crate) fetcher: Arc<dyn Fetcher>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl CatalogDownloader {
    /// Create a downloader that talks HTTP through `reqwest`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use openapi_sleuth::{CatalogDownloader, Config};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config {
    ///     prefix: "acme".to_string(),
    ///     base_url: "https://api.acme.test/specs".to_string(),
    ///     ..Default::default()
    /// };
    /// let downloader = CatalogDownloader::new(config)?;
    /// let summary = downloader.run().await?;
    /// println!("saved {} files", summary.saved());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Create a downloader with a custom [`Fetcher`]
    ///
    /// The event channel buffers [`Config::event_capacity`] events per
    /// subscriber.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;
        let (event_tx, _rx) = tokio::sync::broadcast::channel(config.event_capacity);
        Ok(Self {
            config: Arc::new(config),
            fetcher,
            event_tx,
        })
    }

    /// Subscribe to run events
    ///
    /// Only events sent after subscribing are received. The channel closes once
    /// every clone of the downloader has been dropped. A receiver more than
    /// [`Config::event_capacity`] events behind gets `RecvError::Lagged` and
    /// misses the oldest ones.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers
    ///
    /// With no subscribers the event is dropped; the run does not depend on
    /// anyone listening.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
