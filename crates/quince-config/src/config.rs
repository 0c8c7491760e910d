use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    path::{xdg_config_home, xdg_data_home},
};

/// Archive configuration.
///
/// Every field is optional in the file; the accessors apply defaults.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Directory where uploaded packages are stored.
    /// Default: $XDG_DATA_HOME/quince/packages
    pub store_path: Option<String>,

    /// Maximum number of concurrent reads during a full listing.
    /// Default: 16
    pub parallel_reads: Option<usize>,
}

/// Default configuration file location: `$QUINCE_CONFIG` if set,
/// otherwise `$XDG_CONFIG_HOME/quince/config.toml`.
pub fn default_config_path() -> PathBuf {
    match std::env::var("QUINCE_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => xdg_config_home().join("quince").join("config.toml"),
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    /// when no path is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(ConfigError::IoError {
                    action: format!("reading config {}", path.display()),
                    source: err,
                });
            }
        };

        Ok(toml::from_str(&content)?)
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| xdg_data_home().join("quince").join("packages"))
    }

    pub fn parallel_reads(&self) -> usize {
        self.parallel_reads.unwrap_or(16)
    }
}
