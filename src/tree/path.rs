//! Dot-delimited document paths.

use crate::error::InjectError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated `a.b.c` path.
///
/// Every dot is a delimiter (there is no escape for a literal dot in a key)
/// and every segment is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedPath(String);

impl DottedPath {
    pub fn new(path: impl Into<String>) -> Result<Self, InjectError> {
        let path = path.into();
        if path.is_empty() {
            return Err(InjectError::InvalidPath {
                path,
                reason: "path is empty",
            });
        }
        if path.split('.').any(str::is_empty) {
            return Err(InjectError::InvalidPath {
                path,
                reason: "path contains an empty segment",
            });
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Intermediate segments and the final (leaf) segment.
    pub fn split_leaf(&self) -> (impl Iterator<Item = &str>, &str) {
        let (parents, leaf) = match self.0.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, self.0.as_str()),
        };
        (parents.into_iter().flat_map(|p| p.split('.')), leaf)
    }
}

impl TryFrom<String> for DottedPath {
    type Error = InjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DottedPath {
    type Error = InjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DottedPath> for String {
    fn from(path: DottedPath) -> Self {
        path.0
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_segments() {
        let path = DottedPath::new("database.connection.host").unwrap();
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["database", "connection", "host"]
        );

        let (parents, leaf) = path.split_leaf();
        assert_eq!(parents.collect::<Vec<_>>(), vec!["database", "connection"]);
        assert_eq!(leaf, "host");
    }

    #[test]
    fn test_single_segment_has_no_parents() {
        let path = DottedPath::new("simple").unwrap();
        let (parents, leaf) = path.split_leaf();
        assert_eq!(parents.count(), 0);
        assert_eq!(leaf, "simple");
    }

    #[test]
    fn test_rejects_empty_paths_and_segments() {
        for bad in ["", ".", "a.", ".a", "a..b"] {
            let err = DottedPath::new(bad).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidPath, "{bad:?}");
        }
    }

    #[test]
    fn test_deserializes_with_validation() {
        let ok: DottedPath = serde_json::from_str("\"a.b\"").unwrap();
        assert_eq!(ok.as_str(), "a.b");
        assert!(serde_json::from_str::<DottedPath>("\"a..b\"").is_err());
    }
}
