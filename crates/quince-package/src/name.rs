use std::fmt;

use serde::Serialize;

use crate::error::{PackageError, Result};

/// A validated package name.
///
/// The name doubles as the storage filename stem, so validation is a
/// strict allow-list rather than a sanitizing rewrite: ASCII letters and
/// digits plus `-`, `_`, `+` and `.`, starting with a letter or digit,
/// with `..` never appearing. Anything else is rejected before a path is
/// ever composed from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        let invalid = |reason: &str| {
            Err(PackageError::InvalidName {
                name: name.clone(),
                reason: reason.to_string(),
            })
        };

        if name.is_empty() {
            return invalid("name is empty");
        }
        if !name.as_bytes()[0].is_ascii_alphanumeric() {
            return invalid("must start with a letter or digit");
        }
        if name.contains("..") {
            return invalid("contains '..'");
        }
        if let Some(c) = name.chars().find(|&c| !is_allowed(c)) {
            return Err(PackageError::InvalidName {
                reason: format!("contains disallowed character '{c}'"),
                name,
            });
        }

        Ok(PackageName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
