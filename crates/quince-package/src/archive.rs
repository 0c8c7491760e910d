//! Multi-file package archives.
//!
//! A multi-file package is a tar archive whose top-level directory is
//! `<name>-<version>/` and which carries a `<name>-pkg.el` descriptor
//! with a `(define-package "name" "version" "description" ...)` form.
//! Only the descriptor is read; the rest of the archive streams past.

use std::{
    io::Read,
    path::Path,
    sync::OnceLock,
};

use regex::Regex;
use tar::Archive;

use crate::{
    error::{ErrorContext, PackageError, Result},
    kind::PackageKind,
    metadata::PackageMetadata,
    name::PackageName,
    version::Version,
};

fn descriptor_re() -> &'static Regex {
    static DESCRIPTOR_RE: OnceLock<Regex> = OnceLock::new();
    DESCRIPTOR_RE.get_or_init(|| {
        Regex::new(
            r#"\(define-package\s+"(?P<name>[^"]+)"\s+"(?P<version>[^"]+)"(?:\s+"(?P<desc>[^"]*)")?"#,
        )
        .unwrap()
    })
}

/// Scans archive entries for the package descriptor and derives metadata
/// from it. The reader is consumed entry by entry, so parsing a large
/// archive from disk never buffers the whole file.
pub(crate) fn parse_archive<R: Read>(reader: R) -> Result<PackageMetadata> {
    let mut archive = Archive::new(reader);
    let entries = archive
        .entries()
        .with_context(|| "reading archive entries".to_string())?;

    for entry in entries {
        let mut entry = entry.with_context(|| "reading archive entry".to_string())?;

        let descriptor_path = {
            let path = entry
                .path()
                .with_context(|| "reading archive entry path".to_string())?;
            is_descriptor_path(&path).then(|| path.display().to_string())
        };
        let Some(entry_name) = descriptor_path else {
            continue;
        };

        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .with_context(|| format!("reading descriptor {entry_name}"))?;
        return parse_descriptor(&text, &entry_name);
    }

    Err(PackageError::MissingDescriptor)
}

// The descriptor sits at `<dir>/<name>-pkg.el`, or `<name>-pkg.el` for
// archives built without a wrapping directory.
fn is_descriptor_path(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    file_name.ends_with("-pkg.el") && path.components().count() <= 2
}

fn parse_descriptor(text: &str, entry: &str) -> Result<PackageMetadata> {
    let caps = descriptor_re()
        .captures(text)
        .ok_or_else(|| PackageError::InvalidDescriptor {
            entry: entry.to_string(),
        })?;

    let name = PackageName::new(&caps["name"])?;
    let version = Version::parse(&caps["version"])?;
    let description = caps
        .name("desc")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    Ok(PackageMetadata {
        name,
        version,
        kind: PackageKind::Archive,
        description,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn build_tar(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap()
    }

    const DESCRIPTOR: &str =
        r#"(define-package "quince-theme" "0.3.1" "A soothing theme" '((emacs "26.1")))"#;

    #[test]
    fn finds_descriptor_and_parses_it() {
        let tar = build_tar(&[
            ("quince-theme-0.3.1/README", "read me"),
            ("quince-theme-0.3.1/quince-theme-pkg.el", DESCRIPTOR),
            ("quince-theme-0.3.1/quince-theme.el", ";; code"),
        ]);
        let meta = parse_archive(Cursor::new(tar)).unwrap();
        assert_eq!(meta.name.as_str(), "quince-theme");
        assert_eq!(meta.version, Version::new([0, 3, 1]));
        assert_eq!(meta.kind, PackageKind::Archive);
        assert_eq!(meta.description, "A soothing theme");
    }

    #[test]
    fn accepts_descriptor_without_wrapping_directory() {
        let tar = build_tar(&[("quince-theme-pkg.el", DESCRIPTOR)]);
        let meta = parse_archive(Cursor::new(tar)).unwrap();
        assert_eq!(meta.name.as_str(), "quince-theme");
    }

    #[test]
    fn missing_descriptor_is_an_error() {
        let tar = build_tar(&[("pkg-1.0/pkg.el", ";; no descriptor here")]);
        let err = parse_archive(Cursor::new(tar)).unwrap_err();
        assert!(matches!(err, PackageError::MissingDescriptor));
    }

    #[test]
    fn malformed_descriptor_is_an_error() {
        let tar = build_tar(&[("pkg-1.0/pkg-pkg.el", "(not-a-descriptor)")]);
        let err = parse_archive(Cursor::new(tar)).unwrap_err();
        assert!(matches!(err, PackageError::InvalidDescriptor { .. }));
    }

    #[test]
    fn descriptor_without_description_defaults_to_empty() {
        let tar = build_tar(&[(
            "pkg-1.0/pkg-pkg.el",
            r#"(define-package "pkg" "1.0")"#,
        )]);
        let meta = parse_archive(Cursor::new(tar)).unwrap();
        assert_eq!(meta.description, "");
    }

    #[test]
    fn nested_pkg_el_files_are_ignored() {
        let tar = build_tar(&[("pkg-1.0/vendor/other-pkg.el", DESCRIPTOR)]);
        let err = parse_archive(Cursor::new(tar)).unwrap_err();
        assert!(matches!(err, PackageError::MissingDescriptor));
    }

    #[test]
    fn truncated_archive_is_an_io_error() {
        let mut tar = build_tar(&[("pkg-1.0/pkg-pkg.el", DESCRIPTOR)]);
        tar.truncate(100);
        let err = parse_archive(Cursor::new(tar)).unwrap_err();
        assert!(matches!(err, PackageError::IoError { .. }));
    }
}
