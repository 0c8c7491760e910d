use serde::Serialize;

use crate::{kind::PackageKind, name::PackageName, version::Version};

/// What the archive knows about one stored package.
///
/// Metadata is derived from the persisted bytes on every save, load and
/// listing; it is never stored separately, so it cannot drift from the
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: PackageName,
    pub version: Version,
    pub kind: PackageKind,
    /// Short description from the header line or descriptor. May be empty.
    pub description: String,
}
