//! Configuration types for openapi-sleuth

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HubSpot's public spec enumeration endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.hubspot.com/public/api/spec/v1/specs";

/// Default output prefix (directory name and filename prefix)
pub const DEFAULT_PREFIX: &str = "hubspot";

/// Default event channel buffer
///
/// A run emits at most `2 * catalog_size + 2` events, so this holds every event
/// of a catalog with up to 511 entries even if no subscriber reads until the end.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Largest accepted event channel buffer (the buffer is allocated up front)
pub const MAX_EVENT_CAPACITY: usize = 1 << 20;

/// HTTP client settings shared by the catalog and document requests
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (None = reqwest's default, no timeout)
    #[serde(default, with = "optional_duration_serde")]
    pub timeout: Option<Duration>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for a catalog run
///
/// Every field has a default, so an empty JSON object `{}` is a valid config file
/// and reproduces the stock HubSpot behaviour.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Enumeration endpoint returning the catalog of API definitions
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix for output filenames; also the name of the destination directory
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Directory under which the prefix directory is created (default: ".")
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Number of events buffered for each subscriber
    ///
    /// A subscriber that falls further behind than this loses the oldest events
    /// and is told how many through `RecvError::Lagged`. The run is unaffected.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            output_root: default_output_root(),
            http: HttpConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their defaults. The result is not validated; call
    /// [`Config::validate`] after applying any overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Reject values the downloader cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url", "base URL must not be empty"));
        }
        if self.prefix.trim().is_empty() {
            return Err(Error::config("prefix", "prefix must not be empty"));
        }
        if self.event_capacity == 0 || self.event_capacity > MAX_EVENT_CAPACITY {
            return Err(Error::config(
                "event_capacity",
                format!("event capacity must be between 1 and {MAX_EVENT_CAPACITY}"),
            ));
        }
        Ok(())
    }

    /// Destination directory: `<output_root>/<prefix>`
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(&self.prefix)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

// Optional Duration serialization helper (whole seconds)
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
