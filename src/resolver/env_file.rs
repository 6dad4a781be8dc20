//! `KEY=VALUE` file source (`.env` style).

use super::VariableResolver;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Variables parsed eagerly from a `KEY=VALUE` file.
///
/// Parsing rules:
/// - blank lines and lines starting with `#` (after leading spaces) are skipped
/// - lines without `=` and lines with an empty key are skipped with a warning
/// - key and value are trimmed; a value wrapped in one matching pair of
///   `"` or `'` has the quotes removed, the inside is taken verbatim
/// - later duplicates overwrite earlier ones
#[derive(Debug, Clone, Default)]
pub struct EnvFileResolver {
    variables: HashMap<String, String>,
}

impl EnvFileResolver {
    /// Load variables from `path`.
    ///
    /// A missing or unreadable file yields an empty source.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(file = %path.display(), "Environment file not found");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_with_origin(&content, &path.display().to_string()),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to read environment file");
                Self::default()
            }
        }
    }

    /// Parse variables from in-memory text.
    pub fn parse(content: &str) -> Self {
        Self::parse_with_origin(content, "<memory>")
    }

    fn parse_with_origin(content: &str, origin: &str) -> Self {
        let mut variables = HashMap::new();

        for (index, raw) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!(file = origin, line = line_number, content = line, "Invalid line format, expected KEY=VALUE");
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                warn!(file = origin, line = line_number, "Empty variable name");
                continue;
            }

            variables.insert(key.to_string(), unquote(value.trim()).to_string());
        }

        Self { variables }
    }

    /// Copy of every parsed variable.
    pub fn variables(&self) -> HashMap<String, String> {
        self.variables.clone()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Strip one matching pair of wrapping `"` or `'`.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

impl VariableResolver for EnvFileResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_entries() {
        let resolver = EnvFileResolver::parse(
            "DB_HOST=localhost\n\
             # a comment\n\
             \n\
             DB_PORT = 5432 \n",
        );
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve("DB_HOST").as_deref(), Some("localhost"));
        assert_eq!(resolver.resolve("DB_PORT").as_deref(), Some("5432"));
    }

    #[test]
    fn test_indented_comment_is_skipped() {
        let resolver = EnvFileResolver::parse("   # KEY=value\nREAL=1\n");
        assert_eq!(resolver.resolve("KEY"), None);
        assert_eq!(resolver.resolve("REAL").as_deref(), Some("1"));
    }

    #[test]
    fn test_quotes_are_stripped_once() {
        let resolver = EnvFileResolver::parse(
            "DOUBLE=\"hello world\"\n\
             SINGLE='it works'\n\
             NESTED=\"'inner'\"\n\
             MISMATCHED=\"open'\n\
             LONE=\"\n\
             EMPTY=\"\"\n",
        );
        assert_eq!(resolver.resolve("DOUBLE").as_deref(), Some("hello world"));
        assert_eq!(resolver.resolve("SINGLE").as_deref(), Some("it works"));
        assert_eq!(resolver.resolve("NESTED").as_deref(), Some("'inner'"));
        assert_eq!(resolver.resolve("MISMATCHED").as_deref(), Some("\"open'"));
        assert_eq!(resolver.resolve("LONE").as_deref(), Some("\""));
        assert_eq!(resolver.resolve("EMPTY").as_deref(), Some(""));
    }

    #[test]
    fn test_value_splits_on_first_equals() {
        let resolver = EnvFileResolver::parse("URL=postgres://u:p@h/db?a=b\n");
        assert_eq!(
            resolver.resolve("URL").as_deref(),
            Some("postgres://u:p@h/db?a=b")
        );
    }

    #[test]
    fn test_invalid_lines_are_skipped() {
        let resolver = EnvFileResolver::parse("NO_EQUALS\n=orphan\nGOOD=yes\n");
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve("GOOD").as_deref(), Some("yes"));
        assert_eq!(resolver.resolve("NO_EQUALS"), None);
    }

    #[test]
    fn test_later_duplicates_overwrite() {
        let resolver = EnvFileResolver::parse("KEY=first\nKEY=second\n");
        assert_eq!(resolver.resolve("KEY").as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let resolver = EnvFileResolver::parse("BLANK=\n");
        assert_eq!(resolver.resolve("BLANK").as_deref(), Some(""));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let resolver = EnvFileResolver::load(&temp.path().join(".env"));
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "API_KEY='secret'\n").unwrap();

        let resolver = EnvFileResolver::load(&path);
        assert_eq!(resolver.resolve("API_KEY").as_deref(), Some("secret"));
        assert_eq!(resolver.variables().len(), 1);
    }
}
