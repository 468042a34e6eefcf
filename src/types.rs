//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Separator between key path segments.
pub const KEY_SEPARATOR: char = '.';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Key path cannot be empty")]
    Empty,

    #[error("Key path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// A dot-separated translation key (e.g. `home.footer.copyright`).
///
/// Always holds at least one segment, and no segment is empty. Since the
/// external form is the joined string, no segment can contain `.` either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath(String);

impl KeyPath {
    /// Parses a dot-separated key.
    ///
    /// # Errors
    /// Returns [`PathError`] if the key is empty or has an empty segment
    /// (`"a..b"`, `".a"`, `"a."`).
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }
        if text.split(KEY_SEPARATOR).any(str::is_empty) {
            return Err(PathError::EmptySegment(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    /// Builds a key from a single segment.
    ///
    /// Returns `None` when the segment is empty or contains the separator.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        is_valid_segment(segment).then(|| Self(segment.to_string()))
    }

    /// Appends a segment, returning the longer key.
    ///
    /// Returns `None` when `segment` is not a valid segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<Self> {
        is_valid_segment(segment).then(|| Self(format!("{}{KEY_SEPARATOR}{segment}", self.0)))
    }

    /// Generates a key for a new entry named `name` under `prefix`.
    ///
    /// An empty prefix yields the bare name.
    ///
    /// # Errors
    /// Returns [`PathError`] if the resulting key is invalid.
    pub fn under(prefix: &str, name: &str) -> Result<Self, PathError> {
        if prefix.is_empty() {
            Self::parse(name)
        } else {
            Self::parse(&format!("{prefix}{KEY_SEPARATOR}{name}"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }

    /// Everything but the last segment, or `None` for a single-segment key.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once(KEY_SEPARATOR).map(|(parent, _)| parent)
    }

    /// The last segment.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit_once(KEY_SEPARATOR).map_or(self.0.as_str(), |(_, leaf)| leaf)
    }

    /// Whether `self` lies strictly below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        self.0
            .strip_prefix(ancestor.as_str())
            .is_some_and(|rest| rest.starts_with(KEY_SEPARATOR))
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(KEY_SEPARATOR)
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.0
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque language identifier, usually a locale tag such as `fr-FR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LanguageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for LanguageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
