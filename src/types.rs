//! Core types for openapi-sleuth: the vendor catalog model, run events and outcomes

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use crate::error::SkipReason;

/// Stage tag marking the version to prefer
pub const LATEST_STAGE: &str = "LATEST";

/// Response body of the enumeration endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// API definitions in catalog order (missing or `null` means none)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ApiDefinition>,
}

/// One API listed in the catalog
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiDefinition {
    /// Display name, also used to derive the output filename
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Published versions in catalog order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub versions: Vec<VersionDescriptor>,
}

/// One published version of an API
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Lifecycle tag; only [`LATEST_STAGE`] has meaning here
    #[serde(default)]
    pub stage: Option<String>,

    /// Version number, used only to order several LATEST entries
    #[serde(default, deserialize_with = "lenient_number")]
    pub version: Option<VersionNumber>,

    /// URL of the downloadable OpenAPI document
    #[serde(default, rename = "openApi")]
    pub open_api: Option<String>,
}

impl VersionDescriptor {
    /// Whether this descriptor carries the LATEST stage tag
    pub fn is_latest(&self) -> bool {
        self.stage.as_deref() == Some(LATEST_STAGE)
    }

    /// Version number for ordering, missing treated as zero
    pub fn version_or_zero(&self) -> VersionNumber {
        self.version.unwrap_or(VersionNumber::Int(0))
    }

    /// The document URL, if present and non-empty
    pub fn open_api_url(&self) -> Option<&str> {
        self.open_api.as_deref().filter(|url| !url.is_empty())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A version number as published, compared by numeric value
///
/// Integers are kept exact so that values above 2^53 still order correctly.
/// Equality and ordering are numeric across both variants: `Int(0)`,
/// `Float(0.0)` and `Float(-0.0)` are all equal. Floats are always finite.
#[derive(Clone, Copy, Debug)]
pub enum VersionNumber {
    /// Integral version
    Int(i128),
    /// Fractional (or out-of-integer-range) version
    Float(f64),
}

impl VersionNumber {
    /// Wrap a float, rejecting NaN and infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(VersionNumber::Float(value))
    }

    fn from_json(number: &serde_json::Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            Some(VersionNumber::Int(i128::from(i)))
        } else if let Some(u) = number.as_u64() {
            Some(VersionNumber::Int(i128::from(u)))
        } else {
            number.as_f64().and_then(Self::from_f64)
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text.parse::<i128>() {
            Ok(i) => Some(VersionNumber::Int(i)),
            Err(_) => text.parse::<f64>().ok().and_then(Self::from_f64),
        }
    }
}

// Exact comparison of an integer against a finite float
fn cmp_int_float(i: i128, f: f64) -> Ordering {
    // 2^127; every i128 lies in [-2^127, 2^127)
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    // `whole` is integral and in range, so the cast is exact
    match i.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        other => other,
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (VersionNumber::Int(a), VersionNumber::Int(b)) => a.cmp(&b),
            (VersionNumber::Int(a), VersionNumber::Float(b)) => cmp_int_float(a, b),
            (VersionNumber::Float(a), VersionNumber::Int(b)) => cmp_int_float(b, a).reverse(),
            // Finite floats: partial_cmp is total and treats -0.0 == 0.0
            (VersionNumber::Float(a), VersionNumber::Float(b)) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionNumber {}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionNumber::Int(i) => write!(f, "{i}"),
            VersionNumber::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Serialize for VersionNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            VersionNumber::Int(i) => match i64::try_from(i) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => serializer.serialize_i128(i),
            },
            VersionNumber::Float(x) => serializer.serialize_f64(x),
        }
    }
}

// Vendors are not consistent about numeric fields; accept numbers and numeric
// strings, and treat anything else as absent rather than rejecting the catalog.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<VersionNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => VersionNumber::from_json(&n),
        Some(serde_json::Value::String(s)) => VersionNumber::parse(&s),
        _ => None,
    })
}

/// Event emitted while a catalog run progresses
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Catalog fetched and parsed
    CatalogFetched {
        /// Number of API definitions found
        count: usize,
    },

    /// Catalog had no API definitions; the run ends here
    NothingFound,

    /// An API definition was skipped without a download attempt
    Skipped {
        /// API name
        name: String,
        /// Machine-readable skip reason code
        reason: String,
        /// Human-readable skip reason
        message: String,
    },

    /// Document download started
    Downloading {
        /// API name
        name: String,
        /// Document URL
        url: String,
    },

    /// Document saved to disk
    Saved {
        /// API name
        name: String,
        /// Output file
        path: PathBuf,
    },

    /// Document fetch or write failed
    Failed {
        /// API name
        name: String,
        /// Error message
        error: String,
    },

    /// All entries processed
    Completed {
        /// Number of files saved
        saved: usize,
        /// Destination directory
        directory: PathBuf,
    },
}

impl Event {
    pub(crate) fn skipped(name: &str, reason: SkipReason) -> Self {
        Event::Skipped {
            name: name.to_string(),
            reason: reason.code().to_string(),
            message: reason.to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CatalogFetched { count } => write!(f, "Found {count} API definitions."),
            Event::NothingFound => {
                write!(f, "No API definitions found at the enumeration endpoint.")
            }
            Event::Skipped { name, message, .. } => {
                write!(f, "Skipping API '{name}': {message}.")
            }
            Event::Downloading { name, url } => {
                write!(f, "Downloading OpenAPI for '{name}' from {url}...")
            }
            Event::Saved { name, path } => {
                write!(f, "Saved OpenAPI spec for '{name}' to {}", path.display())
            }
            Event::Failed { name, error } => write!(f, "Error for API '{name}': {error}"),
            Event::Completed { saved, directory } => write!(
                f,
                "Total {saved} OpenAPI file(s) created in '{}' folder.",
                directory.display()
            ),
        }
    }
}

/// Final state of one API definition
#[derive(Clone, Debug, PartialEq)]
pub enum ItemStatus {
    /// Document written to `path`
    Saved {
        /// Output file
        path: PathBuf,
    },
    /// Nothing attempted
    Skipped {
        /// Why the entry was skipped
        reason: SkipReason,
    },
    /// Fetch or write failed
    Failed {
        /// Error message
        error: String,
    },
}

/// Per-item record kept in the run summary
#[derive(Clone, Debug, PartialEq)]
pub struct ItemOutcome {
    /// API name as listed in the catalog
    pub name: String,
    /// What happened to it
    pub status: ItemStatus,
}

/// Result of a completed catalog run
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Number of API definitions in the catalog
    pub catalog_size: usize,
    /// Destination directory (not created when the catalog is empty)
    pub directory: PathBuf,
    /// One entry per API definition, in catalog order
    pub outcomes: Vec<ItemOutcome>,
}

impl RunSummary {
    /// Whether the catalog listed nothing
    pub fn is_empty_catalog(&self) -> bool {
        self.catalog_size == 0
    }

    /// Number of files written
    pub fn saved(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Saved { .. }))
    }

    /// Number of entries skipped
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Skipped { .. }))
    }

    /// Number of entries whose fetch or write failed
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Failed { .. }))
    }

    /// Paths of all saved files, in catalog order
    pub fn saved_paths(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                ItemStatus::Saved { path } => Some(path),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
