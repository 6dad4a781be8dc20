//! Structured error types for change-set processing.

use crate::inject::Policy;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Deferred, aggregated across the whole change-set
    MissingRequiredVariables,

    // Target selection
    FileNotFound,
    UnsupportedFormat,

    // Document errors
    MalformedDocument,
    IoFailure,

    // Caller errors
    InvalidPath,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingRequiredVariables => "MISSING_REQUIRED_VARIABLES",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::MalformedDocument => "MALFORMED_DOCUMENT",
            ErrorCode::IoFailure => "IO_FAILURE",
            ErrorCode::InvalidPath => "INVALID_PATH",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parser error carried by [`InjectError::MalformedDocument`].
pub type ParseCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while applying a change-set.
#[derive(Debug, Error)]
pub enum InjectError {
    /// Placeholders without value or default, collected over every file.
    #[error("missing required variables: {}", join_names(.names))]
    MissingRequiredVariables { names: BTreeSet<String> },

    #[error("configuration file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("no suitable processor found for file: {file_name}")]
    UnsupportedFormat { file_name: String },

    #[error("malformed document {}: {cause}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        cause: ParseCause,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl InjectError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InjectError::MissingRequiredVariables { .. } => ErrorCode::MissingRequiredVariables,
            InjectError::FileNotFound { .. } => ErrorCode::FileNotFound,
            InjectError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            InjectError::MalformedDocument { .. } => ErrorCode::MalformedDocument,
            InjectError::Io { .. } => ErrorCode::IoFailure,
            InjectError::InvalidPath { .. } => ErrorCode::InvalidPath,
        }
    }

    /// Whether the caller should stop under `policy`.
    ///
    /// Missing required variables are gated by `stop_on_missing_required`,
    /// every other kind by `stop_on_error`.
    pub fn is_fatal(&self, policy: &Policy) -> bool {
        match self.code() {
            ErrorCode::MissingRequiredVariables => policy.stop_on_missing_required,
            _ => policy.stop_on_error,
        }
    }

    /// Names carried by a missing-required failure, `None` for other kinds.
    pub fn missing_variables(&self) -> Option<&BTreeSet<String>> {
        match self {
            InjectError::MissingRequiredVariables { names } => Some(names),
            _ => None,
        }
    }

    // Convenience constructors

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InjectError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(
        path: impl Into<PathBuf>,
        cause: impl Into<ParseCause>,
    ) -> Self {
        InjectError::MalformedDocument {
            path: path.into(),
            cause: cause.into(),
        }
    }

    pub fn unsupported(file_name: impl Into<String>) -> Self {
        InjectError::UnsupportedFormat {
            file_name: file_name.into(),
        }
    }
}

/// Result type for change-set operations.
pub type InjectResult<T> = std::result::Result<T, InjectError>;
