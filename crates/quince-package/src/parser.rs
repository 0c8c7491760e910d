use std::{fs::File, io::BufReader, path::Path};

use crate::{
    archive,
    error::{ErrorContext, Result},
    header,
    kind::PackageKind,
    metadata::PackageMetadata,
};

/// Extracts package metadata from uploaded content.
///
/// The store treats the parser as a collaborator: it never inspects
/// package bytes itself, it only persists them and consumes the parsed
/// metadata. Implementations must be cheap to call repeatedly -- the
/// store re-derives metadata on every save, load and listing.
pub trait PackageParser: Send + Sync {
    /// Parses single-file package source text.
    fn parse_single_file(&self, source: &str) -> Result<PackageMetadata>;

    /// Parses an in-memory tar archive.
    fn parse_archive_bytes(&self, bytes: &[u8]) -> Result<PackageMetadata>;

    /// Parses a tar archive by streaming entries from disk, without
    /// buffering the whole file.
    fn parse_archive_file(&self, path: &Path) -> Result<PackageMetadata>;

    /// Dispatches raw bytes on `kind`. Single-file content must be UTF-8.
    fn parse(&self, bytes: &[u8], kind: PackageKind) -> Result<PackageMetadata> {
        match kind {
            PackageKind::SingleFile => {
                let source = std::str::from_utf8(bytes)?;
                self.parse_single_file(source)
            }
            PackageKind::Archive => self.parse_archive_bytes(bytes),
        }
    }
}

/// The default parser: library header lines for single-file packages,
/// `-pkg.el` descriptors for archives.
#[derive(Default, Clone)]
pub struct StandardPackageParser;

impl PackageParser for StandardPackageParser {
    fn parse_single_file(&self, source: &str) -> Result<PackageMetadata> {
        header::parse_single_file(source)
    }

    fn parse_archive_bytes(&self, bytes: &[u8]) -> Result<PackageMetadata> {
        archive::parse_archive(std::io::Cursor::new(bytes))
    }

    fn parse_archive_file(&self, path: &Path) -> Result<PackageMetadata> {
        let file = File::open(path)
            .with_context(|| format!("opening archive {}", path.display()))?;
        archive::parse_archive(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackageError;

    #[test]
    fn parse_dispatches_on_kind() {
        let parser = StandardPackageParser;
        let source = ";;; pkg.el --- Things\n;; Version: 1.0\n";
        let meta = parser
            .parse(source.as_bytes(), PackageKind::SingleFile)
            .unwrap();
        assert_eq!(meta.kind, PackageKind::SingleFile);
    }

    #[test]
    fn non_utf8_single_file_content_is_rejected() {
        let parser = StandardPackageParser;
        let err = parser
            .parse(&[0xff, 0xfe, 0x00], PackageKind::SingleFile)
            .unwrap_err();
        assert!(matches!(err, PackageError::NotUtf8(_)));
    }

    #[test]
    fn parse_archive_file_streams_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.tar");

        let mut builder = tar::Builder::new(Vec::new());
        let descriptor = r#"(define-package "disk-pkg" "2.1" "On disk")"#;
        let mut header = tar::Header::new_gnu();
        header.set_size(descriptor.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "disk-pkg-2.1/disk-pkg-pkg.el", descriptor.as_bytes())
            .unwrap();
        std::fs::write(&path, builder.into_inner().unwrap()).unwrap();

        let parser = StandardPackageParser;
        let meta = parser.parse_archive_file(&path).unwrap();
        assert_eq!(meta.name.as_str(), "disk-pkg");
        assert_eq!(meta.description, "On disk");
    }

    #[test]
    fn missing_archive_file_is_an_io_error() {
        let parser = StandardPackageParser;
        let err = parser
            .parse_archive_file(Path::new("/nonexistent/upload.tar"))
            .unwrap_err();
        assert!(matches!(err, PackageError::IoError { .. }));
    }
}
