//! # openapi-sleuth
//!
//! Enumerate a vendor's published OpenAPI documents and save each one locally.
//!
//! A run fetches the vendor's catalog endpoint, picks one version per listed API
//! (the highest `LATEST` version, else the first listed), downloads that
//! version's OpenAPI document and writes it verbatim to
//! `<output_root>/<prefix>/<prefix>-<sanitized-name>.json`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use openapi_sleuth::{CatalogDownloader, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = CatalogDownloader::new(Config::default())?;
//!
//!     // Print progress as it happens
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event}");
//!         }
//!     });
//!
//!     let summary = downloader.run().await?;
//!     println!("{} saved, {} failed", summary.saved(), summary.failed());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Catalog downloader implementation
pub mod downloader;
/// Error types
pub mod error;
/// HTTP fetcher abstraction
pub mod fetcher;
/// Tracing subscriber setup
pub mod logging;
/// Version selection
pub mod selection;
/// Catalog model, events and run outcomes
pub mod types;
/// Filename helpers
pub mod utils;

// Re-export commonly used types
pub use config::{Config, HttpConfig};
pub use downloader::CatalogDownloader;
pub use error::{Error, Result, SkipReason};
pub use fetcher::{Fetcher, HttpFetcher};
pub use selection::select_version;
pub use types::{
    ApiDefinition, CatalogResponse, Event, ItemOutcome, ItemStatus, RunSummary, VersionDescriptor,
    VersionNumber,
};
pub use utils::sanitize_name;
