//! Error types for openapi-sleuth
//!
//! Two layers of failure exist in a catalog run:
//! - Whole-run errors ([`Error`]) returned from [`CatalogDownloader::run`](crate::CatalogDownloader::run)
//!   when the catalog itself cannot be obtained or the destination cannot be prepared
//! - Per-item outcomes ([`SkipReason`] and failed fetches/writes) which are recorded
//!   in the run summary and never abort sibling items

use std::fmt;
use thiserror::Error;

/// Result type alias for openapi-sleuth operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for openapi-sleuth
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "prefix")
        key: Option<String>,
    },

    /// Transport-level HTTP failure (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("HTTP error {status} fetching {url}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// The status code returned by the server
        status: u16,
    },

    /// JSON (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// HTTP status code carried by this error, if the server responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Why an API definition was skipped without attempting a download
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The definition lists no versions
    NoVersions,
    /// The version selector found nothing to download
    NoSelectableVersion,
    /// The selected version has no `openApi` URL
    MissingOpenApiUrl,
}

impl SkipReason {
    /// Stable machine-readable code, used in JSON event output
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::NoVersions => "no_versions",
            SkipReason::NoSelectableVersion => "no_selectable_version",
            SkipReason::MissingOpenApiUrl => "missing_openapi_url",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoVersions => "no versions",
            SkipReason::NoSelectableVersion => "no valid version info",
            SkipReason::MissingOpenApiUrl => "no openApi URL",
        };
        f.write_str(text)
    }
}
