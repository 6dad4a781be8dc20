//! TOML documents.

use super::DocumentFormat;
use crate::error::ParseCause;
use crate::tree::{DottedPath, set_path};

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl DocumentFormat for TomlFormat {
    type Document = ::toml::Table;

    const NAME: &'static str = "TOML";
    const EXTENSIONS: &'static [&'static str] = &[".toml"];

    fn parse(content: &str) -> Result<Self::Document, ParseCause> {
        Ok(content.parse::<::toml::Table>()?)
    }

    fn render(document: &Self::Document) -> Result<String, ParseCause> {
        Ok(::toml::to_string_pretty(document)?)
    }

    fn set(document: &mut Self::Document, path: &DottedPath, value: &str) -> bool {
        set_path(document, path, value)
    }
}
