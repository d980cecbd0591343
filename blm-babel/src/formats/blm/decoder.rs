//! BLM decoder
//!
//! Turns markup lines into builder calls. Two stacks of small value types
//! track the open regions: one for block state (alignment, indent, heading),
//! one for inline character styles. Alignment and heading are non-nesting:
//! a redundant open is swallowed and a side flag remembers to swallow its
//! close too, so an ignored region never pops real state.
//!
//! Blocks are created lazily, the first time a line actually flushes text.
//! A line made only of control tokens therefore never creates an empty block.
//! The one exception to "every flushed line starts a new block" is a fresh
//! block: the host's pre-existing first paragraph, or the block a page break
//! just inserted. Fresh blocks are decorated in place.

use super::grammar::{scan_token, Token, LITERAL_CLOSE};
use crate::model::builder::DocumentBuilder;
use crate::model::nodes::{Alignment, BlockFormat, CharStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BlockState {
    alignment: Alignment,
    indent: u8,
    heading: u8,
    /// An alignment region is open, whatever its direction.
    aligned: bool,
}

/// Per-line scratch state.
#[derive(Default)]
struct LineState {
    buffer: String,
    block_ready: bool,
}

/// Decodes the body of a BLM stream (everything after the header line).
///
/// State lives for exactly one document; build a new decoder per decode.
pub struct Decoder<'b, B: DocumentBuilder> {
    builder: &'b mut B,
    block: BlockState,
    block_stack: Vec<BlockState>,
    inline: CharStyle,
    inline_stack: Vec<CharStyle>,
    baseline: BlockFormat,
    in_literal: bool,
    fresh_block: bool,
    ignored_alignment: bool,
    ignored_heading: bool,
}

impl<'b, B: DocumentBuilder> Decoder<'b, B> {
    /// Captures the host's baseline block format and cursor style.
    pub fn new(builder: &'b mut B) -> Self {
        let mut baseline = builder.current_block_format();
        baseline.page_break_before = false;
        let inline = builder.current_char_style();
        Self {
            builder,
            block: BlockState::default(),
            block_stack: Vec::new(),
            inline,
            inline_stack: Vec::new(),
            baseline,
            in_literal: false,
            fresh_block: true,
            ignored_alignment: false,
            ignored_heading: false,
        }
    }

    /// Decodes every line of `body`.
    pub fn decode(mut self, body: &str) {
        for line in body.lines() {
            self.decode_line(line);
        }
        if self.in_literal {
            tracing::debug!("literal span left open at end of document");
        }
    }

    pub fn decode_line(&mut self, line: &str) {
        if !self.in_literal && line.trim().is_empty() {
            self.paragraph_break();
            return;
        }

        let mut state = LineState::default();
        let mut rest = line;

        while let Some(ch) = rest.chars().next() {
            if self.in_literal {
                if rest.starts_with(LITERAL_CLOSE) {
                    self.in_literal = false;
                    rest = &rest[LITERAL_CLOSE.len()..];
                } else {
                    state.buffer.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
                continue;
            }

            match scan_token(rest) {
                Some((token, len)) => {
                    self.apply(token, &mut state);
                    rest = &rest[len..];
                }
                None => {
                    state.buffer.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }

        self.flush(&mut state);
    }

    /// A blank line: the first one only marks the initial block as used,
    /// every later one is a real empty paragraph.
    fn paragraph_break(&mut self) {
        if self.fresh_block {
            self.fresh_block = false;
        } else {
            self.builder.insert_block(&self.baseline, CharStyle::default());
        }
    }

    fn apply(&mut self, token: Token, state: &mut LineState) {
        match token {
            Token::LiteralOpen => self.in_literal = true,
            Token::PageBreak => self.page_break(state),
            Token::AlignOpen { alignment, indent } => {
                self.flush(state);
                if self.block.aligned {
                    tracing::trace!(?alignment, "ignoring nested alignment");
                    self.ignored_alignment = true;
                } else {
                    self.block_stack.push(self.block);
                    self.block.alignment = alignment;
                    self.block.indent = indent;
                    self.block.aligned = true;
                }
            }
            Token::AlignClose(_) => {
                self.flush(state);
                if self.ignored_alignment {
                    self.ignored_alignment = false;
                } else if !self.block.aligned {
                    tracing::trace!("ignoring stray alignment close");
                } else if let Some(previous) = self.block_stack.pop() {
                    self.block = previous;
                }
            }
            Token::HeadingOpen(level) => {
                self.flush(state);
                if self.block.heading == 0 && (1..=BlockFormat::MAX_HEADING).contains(&level) {
                    self.block_stack.push(self.block);
                    self.block.heading = level;
                } else {
                    tracing::trace!(level, open = self.block.heading, "ignoring heading");
                    self.ignored_heading = true;
                }
            }
            Token::HeadingClose(_) => {
                self.flush(state);
                if self.ignored_heading {
                    self.ignored_heading = false;
                } else if self.block.heading == 0 {
                    tracing::trace!("ignoring stray heading close");
                } else if let Some(previous) = self.block_stack.pop() {
                    self.block = previous;
                }
            }
            Token::InlineOpen(flag) => {
                self.flush(state);
                self.inline_stack.push(self.inline);
                self.inline = self.inline.with(flag);
            }
            Token::InlineClose(_) => {
                self.flush(state);
                self.inline = self.inline_stack.pop().unwrap_or_default();
            }
        }
    }

    /// Drops every open region and starts a block that begins a new page.
    fn page_break(&mut self, state: &mut LineState) {
        self.flush(state);

        if !self.block_stack.is_empty() || !self.inline_stack.is_empty() {
            tracing::debug!(
                blocks = self.block_stack.len(),
                inlines = self.inline_stack.len(),
                "page break discards open regions"
            );
        }
        self.block_stack.clear();
        self.inline_stack.clear();
        self.block = BlockState::default();
        self.inline = CharStyle::default();
        self.in_literal = false;
        self.ignored_alignment = false;
        self.ignored_heading = false;

        let format = self.baseline.with_page_break();
        if self.fresh_block {
            self.builder.merge_block_format(&format);
        } else {
            self.builder.insert_block(&format, CharStyle::default());
            self.fresh_block = true;
        }
        state.block_ready = false;
    }

    fn ensure_block(&mut self, state: &mut LineState) {
        if state.block_ready {
            return;
        }

        let mut format = self.builder.current_block_format();
        format.alignment = self.block.alignment;
        format.indent = self.block.indent;
        format.heading = self.block.heading;

        if self.fresh_block {
            self.builder.merge_block_format(&format);
            self.fresh_block = false;
        } else {
            format.page_break_before = false;
            self.builder.insert_block(&format, self.inline);
        }
        state.block_ready = true;
    }

    fn flush(&mut self, state: &mut LineState) {
        if state.buffer.is_empty() {
            return;
        }
        self.ensure_block(state);
        let text = std::mem::take(&mut state.buffer);
        self.builder.insert_text(&text, self.inline);
    }
}
