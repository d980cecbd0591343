//! Defines the flat event stream representation of a decode.
//!
//! [`EventRecorder`] is a [`DocumentBuilder`] that keeps every call instead of
//! applying it, which makes the decoder's output observable without a host
//! document.

use crate::model::builder::DocumentBuilder;
use crate::model::nodes::{BlockFormat, CharStyle};
use std::fmt;

/// Represents a single builder call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BeginBatch,
    EndBatch,
    MergeBlockFormat(BlockFormat),
    InsertBlock(BlockFormat),
    InsertText { text: String, style: CharStyle },
}

fn describe_format(f: &mut fmt::Formatter<'_>, format: &BlockFormat) -> fmt::Result {
    write!(f, "{}", format.alignment.name())?;
    if format.indent > 0 {
        write!(f, " indent={}", format.indent)?;
    }
    if format.heading > 0 {
        write!(f, " h{}", format.heading)?;
    }
    if format.page_break_before {
        write!(f, " page-break")?;
    }
    Ok(())
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::BeginBatch => write!(f, "begin-batch"),
            Event::EndBatch => write!(f, "end-batch"),
            Event::MergeBlockFormat(format) => {
                write!(f, "merge-block ")?;
                describe_format(f, format)
            }
            Event::InsertBlock(format) => {
                write!(f, "insert-block ")?;
                describe_format(f, format)
            }
            Event::InsertText { text, style } => {
                write!(f, "text {text:?}")?;
                let flags: Vec<_> = style.flags().map(|flag| flag.name()).collect();
                if !flags.is_empty() {
                    write!(f, " [{}]", flags.join(" "))?;
                }
                Ok(())
            }
        }
    }
}

/// Records builder calls while tracking just enough cursor state to answer
/// the builder's queries.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
    block_format: BlockFormat,
    char_style: CharStyle,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose cursor starts in a block with `format`.
    pub fn with_initial(format: BlockFormat, char_style: CharStyle) -> Self {
        Self {
            events: Vec::new(),
            block_format: format,
            char_style,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// One event per line.
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        for event in &self.events {
            output.push_str(&event.to_string());
            output.push('\n');
        }
        output
    }
}

impl DocumentBuilder for EventRecorder {
    fn begin_batch(&mut self) {
        self.events.push(Event::BeginBatch);
    }

    fn end_batch(&mut self) {
        self.events.push(Event::EndBatch);
    }

    fn current_block_format(&self) -> BlockFormat {
        self.block_format
    }

    fn merge_block_format(&mut self, format: &BlockFormat) {
        self.block_format = *format;
        self.events.push(Event::MergeBlockFormat(*format));
    }

    fn insert_block(&mut self, format: &BlockFormat, char_style: CharStyle) {
        self.block_format = *format;
        self.char_style = char_style;
        self.events.push(Event::InsertBlock(*format));
    }

    fn insert_text(&mut self, text: &str, style: CharStyle) {
        self.char_style = style;
        self.events.push(Event::InsertText {
            text: text.to_string(),
            style,
        });
    }

    fn current_char_style(&self) -> CharStyle {
        self.char_style
    }
}
