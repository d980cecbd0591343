//! Core data structures for the in-memory rich-text document.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl Alignment {
    pub fn name(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Justify => "justify",
        }
    }
}

/// Vertical position of a run. Superscript and subscript share this axis,
/// so a style can never carry both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Normal,
    Superscript,
    Subscript,
}

/// A single inline style axis that can be switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
    Strike,
    Superscript,
    Subscript,
}

impl StyleFlag {
    /// Canonical order: opening tags are always written in this order and
    /// closed in reverse.
    pub const ALL: [StyleFlag; 6] = [
        StyleFlag::Bold,
        StyleFlag::Italic,
        StyleFlag::Underline,
        StyleFlag::Strike,
        StyleFlag::Superscript,
        StyleFlag::Subscript,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StyleFlag::Bold => "bold",
            StyleFlag::Italic => "italic",
            StyleFlag::Underline => "underline",
            StyleFlag::Strike => "strike",
            StyleFlag::Superscript => "superscript",
            StyleFlag::Subscript => "subscript",
        }
    }
}

/// Character formatting shared by every character of a [`Run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub vertical: VerticalAlign,
}

impl CharStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn has(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Bold => self.bold,
            StyleFlag::Italic => self.italic,
            StyleFlag::Underline => self.underline,
            StyleFlag::Strike => self.strike,
            StyleFlag::Superscript => self.vertical == VerticalAlign::Superscript,
            StyleFlag::Subscript => self.vertical == VerticalAlign::Subscript,
        }
    }

    /// Returns a copy with `flag` switched on. Switching on superscript
    /// replaces subscript and vice versa.
    pub fn with(mut self, flag: StyleFlag) -> Self {
        match flag {
            StyleFlag::Bold => self.bold = true,
            StyleFlag::Italic => self.italic = true,
            StyleFlag::Underline => self.underline = true,
            StyleFlag::Strike => self.strike = true,
            StyleFlag::Superscript => self.vertical = VerticalAlign::Superscript,
            StyleFlag::Subscript => self.vertical = VerticalAlign::Subscript,
        }
        self
    }

    pub fn bold(self) -> Self {
        self.with(StyleFlag::Bold)
    }

    pub fn italic(self) -> Self {
        self.with(StyleFlag::Italic)
    }

    pub fn underline(self) -> Self {
        self.with(StyleFlag::Underline)
    }

    pub fn strike(self) -> Self {
        self.with(StyleFlag::Strike)
    }

    pub fn superscript(self) -> Self {
        self.with(StyleFlag::Superscript)
    }

    pub fn subscript(self) -> Self {
        self.with(StyleFlag::Subscript)
    }

    /// The active flags, in canonical order.
    pub fn flags(&self) -> impl Iterator<Item = StyleFlag> + '_ {
        StyleFlag::ALL.into_iter().filter(|flag| self.has(*flag))
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Paragraph-level attributes of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockFormat {
    pub alignment: Alignment,
    /// Indentation steps, 0..=9.
    pub indent: u8,
    /// Heading level, 0 (body text) or 1..=6.
    pub heading: u8,
    pub page_break_before: bool,
}

impl BlockFormat {
    pub const MAX_INDENT: u8 = 9;
    pub const MAX_HEADING: u8 = 6;

    pub fn aligned(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_heading(mut self, heading: u8) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_page_break(mut self) -> Self {
        self.page_break_before = true;
        self
    }
}

/// A maximal span of text sharing one [`CharStyle`].
///
/// Run text is never empty and never contains line terminators; hosts map
/// hard line breaks inside a paragraph to U+2028.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub style: CharStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: CharStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, CharStyle::default())
    }
}

/// One paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub format: BlockFormat,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Block {
    /// A blank paragraph. Empty blocks carry no formatting.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(format: BlockFormat) -> Self {
        Self {
            format,
            runs: Vec::new(),
        }
    }

    pub fn with_run(mut self, text: impl Into<String>, style: CharStyle) -> Self {
        self.push_run(text, style);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_run(text, CharStyle::default())
    }

    /// Appends text, extending the last run when the style is unchanged.
    pub fn push_run(&mut self, text: impl Into<String>, style: CharStyle) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.runs.push(Run::new(text, style)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Rebuilds the block so its runs are maximal, non-empty and free of
    /// line terminators, with attributes clamped to their ranges. An empty
    /// block keeps only its page-break flag.
    pub fn normalized(self) -> Self {
        let mut format = self.format;
        format.indent = format.indent.min(BlockFormat::MAX_INDENT);
        format.heading = format.heading.min(BlockFormat::MAX_HEADING);

        let mut block = Block::new(format);
        for run in self.runs {
            block.push_run(fold_line_breaks(&run.text), run.style);
        }
        if block.is_empty() {
            block.format = BlockFormat {
                page_break_before: format.page_break_before,
                ..BlockFormat::default()
            };
        }
        block
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Maps hard line breaks to U+2028; `\r\n` counts as one break.
pub fn fold_line_breaks(text: &str) -> Cow<'_, str> {
    let is_break = |c: char| c == '\n' || c == '\r';
    if !text.contains(is_break) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("\r\n", "\u{2028}")
            .replace(is_break, "\u{2028}"),
    )
}

/// Represents the root of a document.
///
/// A document always holds at least one block: like an editor buffer, a
/// fresh document starts with a single empty paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::empty()],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::new()
        } else {
            Self { blocks }
        }
    }

    /// Applies [`Block::normalized`] to every block.
    pub fn normalized(self) -> Self {
        Self::from_blocks(self.blocks.into_iter().map(Block::normalized).collect())
    }

    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
