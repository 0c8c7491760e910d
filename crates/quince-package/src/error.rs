//! Error types for the package crate.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while validating or parsing package content.
#[derive(Error, Diagnostic, Debug)]
pub enum PackageError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(quince_package::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error("Invalid package name '{name}': {reason}")]
    #[diagnostic(
        code(quince_package::invalid_name),
        help("Names may use ASCII letters, digits, '-', '_', '+' and '.', must start with a letter or digit, and must not contain '..'")
    )]
    InvalidName { name: String, reason: String },

    #[error("Invalid version '{input}'")]
    #[diagnostic(
        code(quince_package::invalid_version),
        help("Versions are dot-separated non-negative integers, e.g. '1.2.3'")
    )]
    InvalidVersion { input: String },

    #[error("Package source has no library header line")]
    #[diagnostic(
        code(quince_package::missing_header),
        help("The first line of a package should look like ';;; name.el --- description'")
    )]
    MissingHeader,

    #[error("Package source has no version header")]
    #[diagnostic(
        code(quince_package::missing_version),
        help("Add a ';; Version:' or ';; Package-Version:' comment header")
    )]
    MissingVersion,

    #[error("Archive contains no package descriptor")]
    #[diagnostic(
        code(quince_package::missing_descriptor),
        help("Multi-file packages must carry a '<name>-pkg.el' file in their top-level directory")
    )]
    MissingDescriptor,

    #[error("Malformed package descriptor '{entry}'")]
    #[diagnostic(
        code(quince_package::invalid_descriptor),
        help("The descriptor must contain a (define-package \"name\" \"version\" ...) form")
    )]
    InvalidDescriptor { entry: String },

    #[error("Package content is not valid UTF-8")]
    #[diagnostic(code(quince_package::encoding))]
    NotUtf8(#[from] std::str::Utf8Error),
}

/// A specialized Result type for package operations.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            PackageError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
