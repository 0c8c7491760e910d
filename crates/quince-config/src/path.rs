//! XDG base-directory helpers.

use std::{env, path::PathBuf};

/// Returns the user's home directory, from `HOME` or a
/// `/home/{username}` fallback.
pub fn home_dir() -> PathBuf {
    env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| {
        let user = env::var("USER").unwrap_or_else(|_| "root".to_string());
        PathBuf::from(format!("/home/{user}"))
    })
}

/// `XDG_CONFIG_HOME`, defaulting to `$HOME/.config`.
pub fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// `XDG_DATA_HOME`, defaulting to `$HOME/.local/share`.
pub fn xdg_data_home() -> PathBuf {
    env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}
