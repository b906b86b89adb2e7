//! Version selection: which of an API's published versions gets downloaded

use crate::types::VersionDescriptor;

/// Pick the version to download from an API's version list
///
/// Descriptors staged `LATEST` win; among several, the highest `version`
/// (missing counts as 0) is chosen, compared by exact numeric value. The sort is stable, so equal version numbers
/// resolve to whichever came first in the catalog. Without any `LATEST` entry the
/// first descriptor in catalog order is returned, whatever its stage.
///
/// # Examples
///
/// ```
/// use openapi_sleuth::select_version;
/// use openapi_sleuth::types::{VersionDescriptor, VersionNumber};
///
/// let latest = |n| VersionDescriptor {
///     stage: Some("LATEST".into()),
///     version: Some(VersionNumber::Int(n)),
///     open_api: None,
/// };
/// let versions = vec![latest(1), latest(3)];
/// assert_eq!(select_version(&versions).and_then(|v| v.version), Some(VersionNumber::Int(3)));
/// assert!(select_version(&[]).is_none());
/// ```
pub fn select_version(versions: &[VersionDescriptor]) -> Option<&VersionDescriptor> {
    let mut latest: Vec<&VersionDescriptor> = versions.iter().filter(|v| v.is_latest()).collect();

    if !latest.is_empty() {
        latest.sort_by(|a, b| b.version_or_zero().cmp(&a.version_or_zero()));
        return latest.first().copied();
    }

    versions.first()
}
