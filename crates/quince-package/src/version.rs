use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::{PackageError, Result};

/// A package version: a sequence of non-negative integers.
///
/// Comparison is element-wise over the integer components (the derived
/// ordering on the underlying vector), so `1.9` sorts before `1.10` and
/// `0.2` before `0.10`. This is not semver; there are no pre-release or
/// build tags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn new(components: impl Into<Vec<u64>>) -> Self {
        Version(components.into())
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Parses dot-separated decimal text such as `1.2.3`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || {
            PackageError::InvalidVersion {
                input: input.to_string(),
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        trimmed
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()
            .map(Version)
    }
}

impl FromStr for Version {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<Vec<u64>> for Version {
    fn from(components: Vec<u64>) -> Self {
        Version(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dot_separated_integers() {
        assert_eq!(Version::parse("1.2.3").unwrap(), Version::new([1, 2, 3]));
        assert_eq!(Version::parse("0.9").unwrap(), Version::new([0, 9]));
        assert_eq!(Version::parse("20240101").unwrap(), Version::new([20240101]));
        assert_eq!(Version::parse(" 1.0 ").unwrap(), Version::new([1, 0]));
    }

    #[test]
    fn rejects_malformed_versions() {
        for input in ["", "1.", ".1", "1..2", "1.2a", "a.b", "-1.0", "1.2-rc1"] {
            assert!(Version::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn compares_components_as_integers() {
        let v1_9 = Version::parse("1.9").unwrap();
        let v1_10 = Version::parse("1.10").unwrap();
        assert!(v1_9 < v1_10);

        let v0_2 = Version::parse("0.2").unwrap();
        let v0_10 = Version::parse("0.10").unwrap();
        assert!(v0_2 < v0_10);
    }

    #[test]
    fn equality_is_exact() {
        assert_eq!(Version::parse("1.2").unwrap(), Version::new([1, 2]));
        assert_ne!(Version::parse("1.2").unwrap(), Version::new([1, 2, 0]));
    }

    #[test]
    fn displays_in_canonical_form() {
        assert_eq!(Version::new([1, 2, 3]).to_string(), "1.2.3");
        assert_eq!(Version::new([7]).to_string(), "7");
    }
}
