//! JSON format implementation
//!
//! A lossless dump of the document model via serde_json. Useful for
//! inspecting what a decode produced and for feeding documents built by other
//! tools into the BLM encoder.
//!
//! Parsed documents are normalized: hand-written JSON may split runs at
//! arbitrary points, carry empty runs or embed line breaks, none of which the
//! BLM encoder could write back faithfully.

use crate::error::FormatError;
use crate::format::{bool_option, reject_unknown_options, Format};
use crate::model::nodes::Document;
use std::collections::HashMap;

const COMPACT: &str = "compact";

/// Format implementation for JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document model as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn sniff(&self, source: &str) -> bool {
        source.trim_start().starts_with('{') && source.contains("\"blocks\"")
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let doc: Document =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        Ok(doc.normalized())
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map(|json| json + "\n")
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        reject_unknown_options(self.name(), options, &[COMPACT])?;
        if bool_option(options, COMPACT).unwrap_or(false) {
            serde_json::to_string(doc)
                .map(|json| json + "\n")
                .map_err(|e| FormatError::SerializationError(e.to_string()))
        } else {
            self.serialize(doc)
        }
    }
}
