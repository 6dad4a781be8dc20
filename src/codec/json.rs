//! JSON documents (pretty-printed output, key order preserved).

use super::{DocumentError, DocumentFormat};
use crate::error::ParseCause;
use crate::tree::{DottedPath, set_path};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl DocumentFormat for JsonFormat {
    type Document = Map<String, Value>;

    const NAME: &'static str = "JSON";
    const EXTENSIONS: &'static [&'static str] = &[".json"];

    fn parse(content: &str) -> Result<Self::Document, ParseCause> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => Ok(map),
            _ => Err(DocumentError::NotAMapping { format: "JSON" }.into()),
        }
    }

    fn render(document: &Self::Document) -> Result<String, ParseCause> {
        let mut rendered = serde_json::to_string_pretty(document)?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn set(document: &mut Self::Document, path: &DottedPath, value: &str) -> bool {
        set_path(document, path, value)
    }
}
