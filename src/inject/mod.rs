//! Change-set orchestration.
//!
//! Walks every file entry in order, hands it to the codec selected by file
//! suffix and aggregates counts. Document and I/O errors abort the run
//! immediately; missing required variables are collected across all files
//! and reported once, after every entry has been attempted. Files processed
//! before a failure keep their changes.

mod types;

pub use types::{ApplySummary, Change, FileEntry, Policy};

use crate::codec::select_codec;
use crate::error::{InjectError, InjectResult};
use crate::expand::{Expander, MissingVariables};
use crate::resolver::VariableResolver;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Applies change-sets against files under a base directory.
pub struct Injector<'r> {
    base_dir: PathBuf,
    resolver: &'r dyn VariableResolver,
    policy: Policy,
}

impl<'r> Injector<'r> {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        resolver: &'r dyn VariableResolver,
        policy: Policy,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            resolver,
            policy,
        }
    }

    /// Apply every entry in order.
    ///
    /// Fails with [`InjectError::MissingRequiredVariables`] carrying every
    /// offending name when, with `stop_on_missing_required`, any placeholder
    /// had neither a value nor a default.
    pub fn apply(&self, entries: &[FileEntry]) -> InjectResult<ApplySummary> {
        let mut expander = Expander::new(self.resolver, self.policy.stop_on_missing_required);
        let mut summary = ApplySummary::default();

        for entry in entries {
            let path = self.target_path(entry)?;
            let codec = select_codec(&entry.file)?;

            debug!(
                file = %path.display(),
                format = codec.format_name(),
                changes = entry.changes.len(),
                "Processing file"
            );

            if codec.apply(&path, &entry.changes, &mut expander)? {
                summary.modified += 1;
            }
            summary.processed += 1;
        }

        info!(
            processed = summary.processed,
            modified = summary.modified,
            "{}",
            summary
        );

        let missing = expander.into_missing();
        if !missing.is_empty() {
            warn!(count = missing.len(), "Missing required variables");
            return Err(InjectError::MissingRequiredVariables {
                names: missing.into_names(),
            });
        }

        Ok(summary)
    }

    /// Dry run: validate targets and expand every value without loading or
    /// writing any document.
    ///
    /// Returns the variables that are required and unresolved, regardless
    /// of `stop_on_missing_required`.
    pub fn check(&self, entries: &[FileEntry]) -> InjectResult<MissingVariables> {
        let mut expander = Expander::new(self.resolver, true);

        for entry in entries {
            self.target_path(entry)?;
            select_codec(&entry.file)?;
            for change in &entry.changes {
                expander.expand(&change.value);
            }
        }

        Ok(expander.into_missing())
    }

    fn target_path(&self, entry: &FileEntry) -> InjectResult<PathBuf> {
        let path = self.base_dir.join(&entry.file);
        if self.policy.require_existing_files && !path.exists() {
            return Err(InjectError::FileNotFound { path });
        }
        Ok(path)
    }
}

/// Apply `entries` relative to `base_dir`.
pub fn apply_change_set(
    entries: &[FileEntry],
    base_dir: &Path,
    resolver: &dyn VariableResolver,
    policy: Policy,
) -> InjectResult<ApplySummary> {
    Injector::new(base_dir, resolver, policy).apply(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn change(path: &str, value: &str) -> Change {
        Change::new(path, value).unwrap()
    }

    #[test]
    fn test_missing_target_fails_when_required() {
        let temp = TempDir::new().unwrap();
        let resolver: HashMap<String, String> = HashMap::new();
        let injector = Injector::new(temp.path(), &resolver, Policy::default());

        let entries = vec![FileEntry::new("absent.yml", vec![change("a", "b")])];
        let err = injector.apply(&entries).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileNotFound);
    }

    #[test]
    fn test_missing_target_is_created_when_allowed() {
        let temp = TempDir::new().unwrap();
        let resolver: HashMap<String, String> = HashMap::new();
        let policy = Policy {
            require_existing_files: false,
            ..Policy::default()
        };
        let injector = Injector::new(temp.path(), &resolver, policy);

        let entries = vec![FileEntry::new("nested/dir/new.toml", vec![change("a.b", "c")])];
        let summary = injector.apply(&entries).unwrap();
        assert_eq!(summary, ApplySummary { processed: 1, modified: 1 });
        assert!(temp.path().join("nested/dir/new.toml").exists());
    }

    #[test]
    fn test_unsupported_format() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.xml"), "<a/>").unwrap();
        let resolver: HashMap<String, String> = HashMap::new();
        let injector = Injector::new(temp.path(), &resolver, Policy::default());

        let entries = vec![FileEntry::new("config.xml", vec![change("a", "b")])];
        let err = injector.apply(&entries).unwrap_err();
        assert!(matches!(err, InjectError::UnsupportedFormat { ref file_name } if file_name == "config.xml"));
    }

    #[test]
    fn test_check_reports_without_writing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.json");
        std::fs::write(&file, "{}").unwrap();
        let resolver: HashMap<String, String> =
            [("SET".to_string(), "1".to_string())].into_iter().collect();
        let injector = Injector::new(temp.path(), &resolver, Policy::default());

        let entries = vec![FileEntry::new(
            "app.json",
            vec![change("a", "${SET}"), change("b", "${UNSET}"), change("c", "${OPT:x}")],
        )];
        let missing = injector.check(&entries).unwrap();
        assert_eq!(missing.names().iter().collect::<Vec<_>>(), vec!["UNSET"]);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{}");
    }
}
