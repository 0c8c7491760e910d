//! Error types for quince-config.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(quince_config::io), help("Check file permissions"))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(quince_config::toml), help("Check your configuration syntax"))]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
