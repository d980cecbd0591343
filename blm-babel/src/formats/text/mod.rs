//! Plain text format implementation
//!
//! Lossy in both directions: parsing yields one unformatted block per line
//! (blank lines become empty blocks), serializing drops every block and
//! character attribute and writes each block's text on its own line.
//!
//! # Parameters
//!
//! - `blank-line-between-blocks`: separate non-empty blocks with an extra
//!   blank line, the way prose is usually written in plain text files. When
//!   set, parsing also treats a single blank line as a separator only.

use crate::error::FormatError;
use crate::format::{bool_option, reject_unknown_options, Format};
use crate::model::nodes::{Block, Document};
use std::collections::HashMap;

const BLANK_LINE_BETWEEN_BLOCKS: &str = "blank-line-between-blocks";

/// Format implementation for plain text
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormat {
    blank_line_between_blocks: bool,
}

impl TextFormat {
    pub fn new(blank_line_between_blocks: bool) -> Self {
        Self {
            blank_line_between_blocks,
        }
    }
}

pub fn parse_text(source: &str, blank_line_between_blocks: bool) -> Document {
    let mut blocks = Vec::new();
    let mut pending_blanks = 0usize;

    for line in source.lines() {
        if line.trim().is_empty() {
            pending_blanks += 1;
            continue;
        }
        let separators = if blank_line_between_blocks && !blocks.is_empty() {
            pending_blanks.saturating_sub(1)
        } else {
            pending_blanks
        };
        blocks.extend((0..separators).map(|_| Block::empty()));
        pending_blanks = 0;
        blocks.push(Block::empty().with_text(line));
    }

    Document::from_blocks(blocks)
}

pub fn serialize_text(doc: &Document, blank_line_between_blocks: bool) -> String {
    let mut output = String::new();
    let mut previous_had_text = false;

    for block in &doc.blocks {
        let text = block.text();
        if blank_line_between_blocks && previous_had_text && !text.is_empty() {
            output.push('\n');
        }
        previous_had_text = !text.is_empty();
        output.push_str(&text);
        output.push('\n');
    }

    output
}

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text, one paragraph per line (formatting is dropped)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_text(source, self.blank_line_between_blocks))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_text(doc, self.blank_line_between_blocks))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        reject_unknown_options(self.name(), options, &[BLANK_LINE_BETWEEN_BLOCKS])?;
        let blank = bool_option(options, BLANK_LINE_BETWEEN_BLOCKS)
            .unwrap_or(self.blank_line_between_blocks);
        Ok(serialize_text(doc, blank))
    }
}
