//! Change-set data types.

use crate::error::InjectError;
use crate::tree::DottedPath;
use serde::{Deserialize, Serialize};

/// One `path = value` instruction. The value may contain placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub path: DottedPath,
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
}

impl Change {
    pub fn new(path: &str, value: impl Into<String>) -> Result<Self, InjectError> {
        Ok(Self {
            path: DottedPath::new(path)?,
            value: value.into(),
        })
    }
}

/// Accept any scalar for a change value; numbers and booleans are
/// stringified since every leaf is written back as a string.
///
/// Numbers keep the YAML number spelling (`1.0` stays `1.0`). Integers too
/// large for `u64` are already floats once parsed, so they are not exact.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "change value must be a scalar, got {other:?}"
        ))),
    }
}

/// Ordered changes for one target file, relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: String,
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl FileEntry {
    pub fn new(file: impl Into<String>, changes: Vec<Change>) -> Self {
        Self {
            file: file.into(),
            changes,
        }
    }
}

/// Caller policy for a change-set run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Policy {
    /// Record placeholders without value or default, and treat the
    /// aggregated failure as fatal (default: true).
    #[serde(default = "default_true")]
    pub stop_on_missing_required: bool,

    /// Treat every other error kind as fatal (default: false).
    #[serde(default)]
    pub stop_on_error: bool,

    /// Fail with `FileNotFound` when a target does not exist instead of
    /// creating it (default: true).
    #[serde(default = "default_true")]
    pub require_existing_files: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            stop_on_missing_required: true,
            stop_on_error: false,
            require_existing_files: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Counts reported by a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub processed: usize,
    pub modified: usize,
}

impl std::fmt::Display for ApplySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} files, modified {} files",
            self.processed, self.modified
        )
    }
}
