//! Core data model for glibc symbol versions.
//!
//! - `Version`: one parsed `GLIBC_x.y[.z]` tag body.
//! - `VersionSet`: the ordered, deduplicated collection of versions found in
//!   a single binary. Violation lists reuse the same type.

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a tag body is not a valid glibc version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text did not split into two or three dot-separated components.
    #[error("unable to parse glibc version '{0}'")]
    Format(String),

    /// One of the components was not a base-10 non-negative integer.
    #[error("invalid component in glibc version '{text}': {source}")]
    Component {
        text: String,
        #[source]
        source: ParseIntError,
    },
}

/// A single glibc symbol-versioning tag, e.g. the `2.17` in `GLIBC_2.17`.
///
/// `full` keeps the text exactly as it appeared in the binary and is what gets
/// displayed. The numeric triple drives ordering and predicate evaluation.
/// A missing patch component is stored as `0`, so `2.17` and `2.17.0` share a
/// triple but remain distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub full: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Parse a `major.minor[.patch]` string.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = text.split('.').collect();
        // glibc tags are either <major>.<minor> or <major>.<minor>.<patch>.
        if parts.len() != 2 && parts.len() != 3 {
            return Err(ParseError::Format(text.to_string()));
        }

        let component = |raw: &str| {
            raw.parse::<u32>()
                .map_err(|source| ParseError::Component { text: text.to_string(), source })
        };

        let major = component(parts[0])?;
        let minor = component(parts[1])?;
        let patch = match parts.get(2).copied() {
            Some(raw) => component(raw)?,
            None => 0,
        };

        Ok(Self { full: text.to_string(), major, minor, patch })
    }

    /// The `(major, minor, patch)` triple used for ordering.
    pub fn triple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// Lexicographic comparison on the numeric triple; `full` is ignored.
    pub fn cmp_triple(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Ascending, immutable sequence of versions.
///
/// Built once per binary by the extractor, or per call by the constraint
/// evaluator for its violation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionSet {
    versions: Vec<Version>,
}

impl VersionSet {
    /// Stable-sort `versions` by their numeric triple.
    ///
    /// Entries sharing a triple keep their relative input order.
    pub fn sorted(mut versions: Vec<Version>) -> Self {
        versions.sort_by(Version::cmp_triple);
        Self { versions }
    }

    /// Wrap a sequence that is already in the desired order.
    pub fn from_sorted(versions: Vec<Version>) -> Self {
        Self { versions }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Version> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn as_slice(&self) -> &[Version] {
        &self.versions
    }

    pub fn into_vec(self) -> Vec<Version> {
        self.versions
    }

    /// Oldest required version, if any.
    pub fn min(&self) -> Option<&Version> {
        self.versions.first()
    }

    /// Newest required version, if any.
    pub fn max(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Versions for which `expression` does not hold.
    ///
    /// See [`crate::analysis::find_violations`].
    pub fn find_violations(
        &self,
        expression: &str,
    ) -> Result<VersionSet, crate::analysis::ConstraintError> {
        crate::analysis::find_violations(self, expression)
    }
}

impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, version) in self.versions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{version}")?;
        }
        Ok(())
    }
}

impl IntoIterator for VersionSet {
    type Item = Version;
    type IntoIter = std::vec::IntoIter<Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.into_iter()
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a Version;
    type IntoIter = std::slice::Iter<'a, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}
