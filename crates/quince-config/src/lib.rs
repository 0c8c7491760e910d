//! Configuration for the quince archive.
//!
//! Configuration lives in a TOML file (`$QUINCE_CONFIG` or
//! `$XDG_CONFIG_HOME/quince/config.toml`); every field is optional and
//! a missing file yields defaults, so a fresh installation works with
//! no setup.

pub mod config;
pub mod error;
pub mod path;

pub use config::{default_config_path, Config};
pub use error::ConfigError;
