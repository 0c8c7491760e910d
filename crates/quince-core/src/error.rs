//! Error types for quince-core.

use miette::Diagnostic;
use quince_package::{PackageError, PackageName, Version};
use thiserror::Error;

/// Errors surfaced by the package store.
#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Package(#[from] PackageError),

    #[error("Error while {action}")]
    #[diagnostic(code(quince_core::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Package '{name}' is stored at version {stored}, not the requested {requested}")]
    #[diagnostic(
        code(quince_core::wrong_version),
        help("Query the archive listing for the currently stored version")
    )]
    WrongVersion {
        name: PackageName,
        requested: Version,
        stored: Version,
    },

    #[error("Unknown file type '{0}'")]
    #[diagnostic(
        code(quince_core::unknown_file_type),
        help("Supported types are 'single-file' and 'archive'")
    )]
    UnknownFileType(String),

    #[error("Listing worker failed: {0}")]
    #[diagnostic(code(quince_core::listing))]
    ListingWorker(String),
}

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, StoreError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, StoreError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            StoreError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
