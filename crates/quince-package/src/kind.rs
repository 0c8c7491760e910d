use std::fmt;

use serde::Serialize;

/// Storage format of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageKind {
    /// One Emacs Lisp source file.
    SingleFile,
    /// A tar archive with a package descriptor.
    Archive,
}

impl PackageKind {
    /// Filename extension used in the store directory.
    pub fn extension(self) -> &'static str {
        match self {
            PackageKind::SingleFile => "el",
            PackageKind::Archive => "tar",
        }
    }

    /// Maps a store filename extension back to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "el" => Some(PackageKind::SingleFile),
            "tar" => Some(PackageKind::Archive),
            _ => None,
        }
    }

    /// Maps the type tag used by upload requests.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            "single-file" => Some(PackageKind::SingleFile),
            "archive" => Some(PackageKind::Archive),
            _ => None,
        }
    }

    pub fn type_tag(self) -> &'static str {
        match self {
            PackageKind::SingleFile => "single-file",
            PackageKind::Archive => "archive",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_round_trip() {
        for kind in [PackageKind::SingleFile, PackageKind::Archive] {
            assert_eq!(PackageKind::from_extension(kind.extension()), Some(kind));
        }
        assert_eq!(PackageKind::from_extension("zip"), None);
    }

    #[test]
    fn type_tags_round_trip() {
        assert_eq!(
            PackageKind::from_type_tag("single-file"),
            Some(PackageKind::SingleFile)
        );
        assert_eq!(
            PackageKind::from_type_tag("archive"),
            Some(PackageKind::Archive)
        );
        assert_eq!(PackageKind::from_type_tag("zip"), None);
        assert_eq!(PackageKind::from_type_tag("el"), None);
    }
}
