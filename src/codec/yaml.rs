//! YAML documents (block style output).

use super::{DocumentError, DocumentFormat};
use crate::error::ParseCause;
use crate::tree::{DottedPath, set_path};
use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl DocumentFormat for YamlFormat {
    type Document = Mapping;

    const NAME: &'static str = "YAML";
    const EXTENSIONS: &'static [&'static str] = &[".yml", ".yaml"];

    fn parse(content: &str) -> Result<Mapping, ParseCause> {
        if is_blank(content) {
            return Ok(Mapping::new());
        }
        // A bare `~` or `null` document also counts as empty
        match serde_yaml::from_str::<Value>(content)? {
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(DocumentError::NotAMapping { format: "YAML" }.into()),
        }
    }

    fn render(document: &Mapping) -> Result<String, ParseCause> {
        Ok(serde_yaml::to_string(document)?)
    }

    fn set(document: &mut Mapping, path: &DottedPath, value: &str) -> bool {
        set_path(document, path, value)
    }
}

/// Only whitespace and comment lines.
fn is_blank(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::get_path;

    fn path(s: &str) -> DottedPath {
        DottedPath::new(s).unwrap()
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        assert!(YamlFormat::parse("").unwrap().is_empty());
        assert!(YamlFormat::parse("# only a comment\n").unwrap().is_empty());
        assert!(YamlFormat::parse("~\n").unwrap().is_empty());
    }

    #[test]
    fn test_non_mapping_top_level_is_rejected() {
        let err = YamlFormat::parse("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("not a mapping"));
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        assert!(YamlFormat::parse("key: [unclosed\n").is_err());
    }

    #[test]
    fn test_render_is_block_style() {
        let mut doc = Mapping::new();
        YamlFormat::set(&mut doc, &path("database.connection.host"), "localhost");
        YamlFormat::set(&mut doc, &path("database.connection.port"), "3306");

        let rendered = YamlFormat::render(&doc).unwrap();
        assert!(rendered.starts_with("database:\n  connection:\n    host: localhost\n"));
        assert!(!rendered.contains('{'));

        let reparsed = YamlFormat::parse(&rendered).unwrap();
        assert_eq!(get_path(&reparsed, &path("database.connection.port")), Some("3306"));
    }
}
