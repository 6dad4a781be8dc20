//! Per-format document codecs.
//!
//! Each supported format is a unit type implementing [`DocumentFormat`]:
//! how to parse, render and set a value in its native document shape. The
//! load / expand / set / write-if-modified loop is shared by every format
//! through the blanket [`FormatCodec`] implementation.
//!
//! ## Selection
//! Codecs are matched by case-insensitive file suffix, in a fixed order:
//! YAML (`.yml`, `.yaml`), JSON, properties, TOML.

mod json;
mod properties;
mod toml;
mod yaml;

pub use json::JsonFormat;
pub use properties::PropertiesFormat;
pub use toml::TomlFormat;
pub use yaml::YamlFormat;

use crate::error::{InjectError, InjectResult, ParseCause};
use crate::expand::Expander;
use crate::inject::Change;
use crate::tree::DottedPath;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Structural problems found while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("top-level {format} value is not a mapping")]
    NotAMapping { format: &'static str },

    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },
}

/// A document format with its native in-memory shape.
pub trait DocumentFormat {
    /// In-memory document. `Default` is the empty document.
    type Document: Default;

    /// Human-readable format name, used in logs.
    const NAME: &'static str;

    /// Lowercase file suffixes, including the dot.
    const EXTENSIONS: &'static [&'static str];

    fn parse(content: &str) -> Result<Self::Document, ParseCause>;

    fn render(document: &Self::Document) -> Result<String, ParseCause>;

    /// Set the value at `path`, returning whether it changed.
    fn set(document: &mut Self::Document, path: &DottedPath, value: &str) -> bool;

    /// Load `path`, or the empty document if it does not exist.
    fn load(path: &Path) -> InjectResult<Self::Document> {
        if !path.exists() {
            return Ok(Self::Document::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| InjectError::io(path, e))?;
        Self::parse(&content).map_err(|cause| InjectError::malformed(path, cause))
    }

    /// Render and overwrite `path`, creating parent directories if needed.
    fn store(path: &Path, document: &Self::Document) -> InjectResult<()> {
        let rendered = Self::render(document).map_err(|cause| InjectError::malformed(path, cause))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| InjectError::io(parent, e))?;
        }
        std::fs::write(path, rendered).map_err(|e| InjectError::io(path, e))
    }
}

/// Object-safe view of a format, as used by the change-set orchestrator.
pub trait FormatCodec: Send + Sync {
    fn format_name(&self) -> &'static str;

    /// Case-insensitive suffix match on the file name.
    fn can_handle(&self, file_name: &str) -> bool;

    /// Apply `changes` in order to the document at `path`.
    ///
    /// Values are expanded through `expander` before being set. The file is
    /// rewritten only if at least one leaf changed; the return value says
    /// whether it was.
    fn apply(
        &self,
        path: &Path,
        changes: &[Change],
        expander: &mut Expander<'_>,
    ) -> InjectResult<bool>;
}

impl<F> FormatCodec for F
where
    F: DocumentFormat + Send + Sync,
{
    fn format_name(&self) -> &'static str {
        F::NAME
    }

    fn can_handle(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        F::EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }

    fn apply(
        &self,
        path: &Path,
        changes: &[Change],
        expander: &mut Expander<'_>,
    ) -> InjectResult<bool> {
        let mut document = F::load(path)?;

        let mut modified = false;
        for change in changes {
            let value = expander.expand(&change.value);
            let changed = F::set(&mut document, &change.path, &value);
            debug!(
                file = %path.display(),
                path = %change.path,
                changed,
                "Applied change"
            );
            modified |= changed;
        }

        if modified {
            F::store(path, &document)?;
            info!(file = %path.display(), format = F::NAME, "Updated configuration file");
        }

        Ok(modified)
    }
}

static CODECS: [&dyn FormatCodec; 4] = [&YamlFormat, &JsonFormat, &PropertiesFormat, &TomlFormat];

/// All codecs, in selection order.
pub fn codecs() -> &'static [&'static dyn FormatCodec] {
    &CODECS
}

/// Pick the codec for `file_name` by suffix.
pub fn select_codec(file_name: &str) -> InjectResult<&'static dyn FormatCodec> {
    CODECS
        .iter()
        .copied()
        .find(|codec| codec.can_handle(file_name))
        .ok_or_else(|| InjectError::unsupported(file_name))
}
