//! Single-file package header parsing.
//!
//! A single-file package declares its identity in comment headers:
//!
//! ```text
//! ;;; quince-mode.el --- A mode for quinces
//! ;; Version: 1.2
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    error::{PackageError, Result},
    kind::PackageKind,
    metadata::PackageMetadata,
    name::PackageName,
    version::Version,
};

// `;;; name.el --- description`, optionally ending with a `-*- ... -*-`
// local-variables block that is not part of the description.
fn header_re() -> &'static Regex {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    HEADER_RE.get_or_init(|| {
        Regex::new(r"(?m)^;;;\s+(?P<name>\S+)\.el\s+---\s*(?P<desc>.*?)\s*(?:-\*-.*)?$").unwrap()
    })
}

fn version_re() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| {
        Regex::new(r"(?m)^;;+\s*(?P<key>Package-Version|Version):\s*(?P<value>\S+)\s*$").unwrap()
    })
}

pub(crate) fn parse_single_file(source: &str) -> Result<PackageMetadata> {
    let header = header_re()
        .captures(source)
        .ok_or(PackageError::MissingHeader)?;
    let name = PackageName::new(&header["name"])?;
    let description = header["desc"].to_string();

    // `Package-Version:` takes precedence over `Version:` when both are
    // present; otherwise the first version header wins.
    let mut version_text: Option<&str> = None;
    for caps in version_re().captures_iter(source) {
        let value = caps.name("value").map(|m| m.as_str());
        if &caps["key"] == "Package-Version" {
            version_text = value;
            break;
        }
        if version_text.is_none() {
            version_text = value;
        }
    }

    let version = Version::parse(version_text.ok_or(PackageError::MissingVersion)?)?;

    Ok(PackageMetadata {
        name,
        version,
        kind: PackageKind::SingleFile,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
;;; quince-mode.el --- A major mode for quinces

;; Copyright (C) 2025 Someone

;; Author: Someone <someone@example.com>
;; Version: 1.2
;; Keywords: fruit

;;; Commentary:

;; Not much to say.

;;; Code:

(provide 'quince-mode)
;;; quince-mode.el ends here
";

    #[test]
    fn parses_name_version_and_description() {
        let meta = parse_single_file(SAMPLE).unwrap();
        assert_eq!(meta.name.as_str(), "quince-mode");
        assert_eq!(meta.version, Version::new([1, 2]));
        assert_eq!(meta.kind, PackageKind::SingleFile);
        assert_eq!(meta.description, "A major mode for quinces");
    }

    #[test]
    fn strips_local_variable_suffix_from_description() {
        let source = "\
;;; pkg.el --- Does things -*- lexical-binding: t; -*-
;; Version: 0.1
";
        let meta = parse_single_file(source).unwrap();
        assert_eq!(meta.description, "Does things");
    }

    #[test]
    fn package_version_header_wins() {
        let source = "\
;;; pkg.el --- Things
;; Version: 1.0
;; Package-Version: 2.0
";
        let meta = parse_single_file(source).unwrap();
        assert_eq!(meta.version, Version::new([2, 0]));
    }

    #[test]
    fn missing_header_line_is_an_error() {
        let err = parse_single_file("(provide 'pkg)\n").unwrap_err();
        assert!(matches!(err, PackageError::MissingHeader));
    }

    #[test]
    fn missing_version_header_is_an_error() {
        let err = parse_single_file(";;; pkg.el --- Things\n").unwrap_err();
        assert!(matches!(err, PackageError::MissingVersion));
    }

    #[test]
    fn malformed_version_is_an_error() {
        let source = "\
;;; pkg.el --- Things
;; Version: one.two
";
        let err = parse_single_file(source).unwrap_err();
        assert!(matches!(err, PackageError::InvalidVersion { .. }));
    }

    #[test]
    fn header_name_is_validated() {
        // Name validation runs on the header-declared name, so a header
        // that smuggles path syntax is rejected.
        let source = "\
;;; ../evil.el --- Things
;; Version: 1.0
";
        let err = parse_single_file(source).unwrap_err();
        assert!(matches!(err, PackageError::InvalidName { .. }));
    }

    #[test]
    fn empty_description_is_allowed() {
        let source = "\
;;; pkg.el ---
;; Version: 0.5
";
        let meta = parse_single_file(source).unwrap();
        assert_eq!(meta.description, "");
    }
}
