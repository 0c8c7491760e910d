use miette::Diagnostic;
use quince_package::PackageError;
use thiserror::Error;

/// Top-level error type for the quince binary.
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] quince_core::error::StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] quince_config::ConfigError),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(quince::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error("Cannot infer package type of '{0}'")]
    #[diagnostic(
        code(quince::unknown_kind),
        help("Pass --kind single-file or --kind archive")
    )]
    UnknownKind(String),

    #[error("--relocate only applies to archive uploads")]
    #[diagnostic(code(quince::relocate))]
    RelocateSingleFile,
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            CliError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
