//! Named formats and how a file picks one
//!
//! The CLI never talks to a format type directly. It resolves a name (from
//! `--from`/`--to`, a file extension, or the content itself) through the
//! registry and then parses or serializes through the [`Format`] trait.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::nodes::Document;
use std::collections::HashMap;

/// Formats keyed by [`Format::name`].
///
/// Lookups that need to pick "the first" format walk the names in sorted
/// order, so detection never depends on registration order.
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let doc = registry.parse("::BLM1::\nhello\n", "blm")?;
/// let text = registry.serialize(&doc, "text")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

#[derive(Clone, Copy)]
enum Direction {
    Parse,
    Serialize,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Adds `format`, replacing any format already registered under its name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// First format (by name) claiming the extension of `filename`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;
        self.first_matching(|format| format.file_extensions().contains(&extension))
    }

    /// First parseable format (by name) whose [`Format::sniff`] accepts `source`.
    pub fn detect_format_from_source(&self, source: &str) -> Option<String> {
        self.first_matching(|format| format.supports_parsing() && format.sniff(source))
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        self.capable(format, Direction::Parse)?.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serializes with format-specific `options` (the CLI's `--extra-*` values).
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.capable(format, Direction::Serialize)?
            .serialize_with_options(doc, options)
    }

    /// BLM plus the text, JSON and treeviz companions.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::blm::BlmFormat);
        registry.register(crate::formats::text::TextFormat::default());
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::treeviz::TreevizFormat::default());

        registry
    }

    fn first_matching(&self, accepts: impl Fn(&dyn Format) -> bool) -> Option<String> {
        self.list_formats()
            .into_iter()
            .find(|name| self.formats.get(name).is_some_and(|f| accepts(f.as_ref())))
    }

    fn capable(&self, name: &str, direction: Direction) -> Result<&dyn Format, FormatError> {
        let format = self.get(name)?;
        let (supported, verb) = match direction {
            Direction::Parse => (format.supports_parsing(), "parsing"),
            Direction::Serialize => (format.supports_serialization(), "serialization"),
        };
        if supported {
            Ok(format)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{name}' does not support {verb}"
            )))
        }
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
