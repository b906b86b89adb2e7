//! Utility functions for filename derivation

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"));

/// Turn an API display name into a filesystem-safe token
///
/// Lowercases the name, collapses every run of characters outside `[a-z0-9]`
/// into one hyphen and trims hyphens from both ends. Applying it twice gives the
/// same result as applying it once.
///
/// # Examples
///
/// ```
/// use openapi_sleuth::utils::sanitize_name;
///
/// assert_eq!(sanitize_name("My API! v2.0"), "my-api-v2-0");
/// assert_eq!(sanitize_name("my-api-v2-0"), "my-api-v2-0");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Output file for an API: `<dir>/<prefix>-<sanitized-name>.json`
pub fn output_path(dir: &Path, prefix: &str, api_name: &str) -> PathBuf {
    dir.join(format!("{}-{}.json", prefix, sanitize_name(api_name)))
}
