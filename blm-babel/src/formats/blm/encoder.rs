//! BLM encoder
//!
//! Each non-empty block is written as exactly one text line, framed by
//! control lines:
//!
//! ```text
//! \{p}          only when the block starts a new page
//! \{c2          alignment open, when alignment != left or indent > 0
//! \{h1          heading open, when heading > 0
//! text line     inline tags + escaped run text
//! \h1}
//! \c}
//! ```
//!
//! Keeping opens on their own line means the indent digits of an alignment
//! open can never run into text that starts with a digit. Empty blocks are a
//! bare blank line, which the decoder reads back as a paragraph break.
//! Empty runs are skipped and line breaks inside a run are written as U+2028,
//! so one block always stays one text line.

use super::escape::{escape_text, protect_blank_line};
use super::grammar::{alignment_marker, style_marker, MAGIC, PAGE_BREAK};
use crate::model::nodes::{
    fold_line_breaks, Alignment, Block, BlockFormat, CharStyle, Document, StyleFlag,
};

/// Inline tags currently open on a text line. Fresh per block.
#[derive(Default)]
struct OpenTags {
    stack: Vec<StyleFlag>,
}

impl OpenTags {
    /// Moves from the currently open tags to `target`.
    ///
    /// The decoder closes by popping its stack, whatever tag the close names,
    /// so a flag that turns off forces every tag opened after it to close
    /// too. Whatever is still wanted is then reopened in canonical order.
    fn transition(&mut self, target: CharStyle, out: &mut String) {
        let keep = self
            .stack
            .iter()
            .take_while(|flag| target.has(**flag))
            .count();
        while self.stack.len() > keep {
            if let Some(flag) = self.stack.pop() {
                push_close(out, flag);
            }
        }
        for flag in target.flags() {
            if !self.stack.contains(&flag) {
                out.push_str("\\{");
                out.push(style_marker(flag));
                self.stack.push(flag);
            }
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while let Some(flag) = self.stack.pop() {
            push_close(out, flag);
        }
    }
}

fn push_close(out: &mut String, flag: StyleFlag) {
    out.push('\\');
    out.push(style_marker(flag));
    out.push('}');
}

fn encode_text_line(block: &Block) -> String {
    let mut line = String::new();
    let mut tags = OpenTags::default();
    for run in &block.runs {
        let text = fold_line_breaks(&run.text);
        if text.is_empty() {
            continue;
        }
        tags.transition(run.style, &mut line);
        line.push_str(&escape_text(&text));
    }
    tags.close_all(&mut line);
    protect_blank_line(&line).into_owned()
}

fn encode_block(block: &Block, out: &mut String) {
    let format: &BlockFormat = &block.format;

    if format.page_break_before {
        out.push_str(PAGE_BREAK);
        out.push('\n');
    }

    if block.runs.iter().all(|run| run.text.is_empty()) {
        out.push('\n');
        return;
    }

    let indent = format.indent.min(BlockFormat::MAX_INDENT);
    let heading = format.heading.min(BlockFormat::MAX_HEADING);
    let aligned = format.alignment != Alignment::Left || indent > 0;
    let marker = alignment_marker(format.alignment);

    if aligned {
        out.push_str("\\{");
        out.push(marker);
        if indent > 0 {
            out.push_str(&indent.to_string());
        }
        out.push('\n');
    }
    if heading > 0 {
        out.push_str(&format!("\\{{h{heading}\n"));
    }

    out.push_str(&encode_text_line(block));
    out.push('\n');

    if heading > 0 {
        out.push_str(&format!("\\h{heading}}}\n"));
    }
    if aligned {
        out.push('\\');
        out.push(marker);
        out.push_str("}\n");
    }
}

/// Encodes a sequence of blocks, header line included.
pub fn encode_blocks<'a, I>(blocks: I) -> String
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut out = String::new();
    out.push_str(MAGIC);
    out.push('\n');
    for block in blocks {
        encode_block(block, &mut out);
    }
    out
}

pub fn encode_document(doc: &Document) -> String {
    encode_blocks(&doc.blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::nodes::Run;

    fn body(blocks: &[Block]) -> String {
        let encoded = encode_blocks(blocks);
        encoded
            .strip_prefix("::BLM1::\n")
            .expect("header first")
            .to_string()
    }

    #[test]
    fn test_plain_paragraphs() {
        let blocks = [
            Block::empty().with_text("hello"),
            Block::empty(),
            Block::empty().with_text("world"),
        ];
        assert_eq!(body(&blocks), "hello\n\nworld\n");
    }

    #[test]
    fn test_alignment_and_heading_frame_the_text_line() {
        let block = Block::new(
            BlockFormat::aligned(Alignment::Center)
                .with_indent(2)
                .with_heading(1),
        )
        .with_text("Title");
        assert_eq!(body(&[block]), "\\{c2\n\\{h1\nTitle\n\\h1}\n\\c}\n");
    }

    #[test]
    fn test_indent_only_uses_left_marker() {
        let block = Block::new(BlockFormat::default().with_indent(4)).with_text("x");
        assert_eq!(body(&[block]), "\\{l4\nx\n\\l}\n");
    }

    #[test]
    fn test_out_of_range_format_is_clamped() {
        let block = Block::new(BlockFormat::default().with_indent(42).with_heading(8)).with_text("x");
        assert_eq!(body(&[block]), "\\{l9\n\\{h6\nx\n\\h6}\n\\l}\n");
    }

    #[test]
    fn test_inline_tags_open_in_canonical_order() {
        let block = Block::empty().with_run("x", CharStyle::plain().italic().bold());
        assert_eq!(body(&[block]), "\\{b\\{ix\\i}\\b}\n");
    }

    #[test]
    fn test_closing_an_outer_tag_reopens_inner_ones() {
        let block = Block {
            format: BlockFormat::default(),
            runs: vec![
                Run::new("both", CharStyle::plain().bold().italic()),
                Run::new("italic", CharStyle::plain().italic()),
            ],
        };
        assert_eq!(body(&[block]), "\\{b\\{iboth\\i}\\b}\\{iitalic\\i}\n");
    }

    #[test]
    fn test_inner_tag_closes_without_touching_outer() {
        let block = Block {
            format: BlockFormat::default(),
            runs: vec![
                Run::new("b", CharStyle::plain().bold()),
                Run::new("bu", CharStyle::plain().bold().underline()),
                Run::new("b", CharStyle::plain().bold()),
                Run::plain("."),
            ],
        };
        assert_eq!(body(&[block]), "\\{bb\\{ubu\\u}b\\b}.\n");
    }

    #[test]
    fn test_superscript_switches_to_subscript() {
        let block = Block {
            format: BlockFormat::default(),
            runs: vec![
                Run::new("2", CharStyle::plain().superscript()),
                Run::new("i", CharStyle::plain().subscript()),
            ],
        };
        assert_eq!(body(&[block]), "\\{^2\\^}\\{_i\\_}\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let block = Block::empty().with_text("use \\{b for bold");
        assert_eq!(
            body(&[block]),
            "use \\{@literal@\\{b\\@literal@} for bold\n"
        );
    }

    #[test]
    fn test_whitespace_only_block_is_protected() {
        let block = Block::empty().with_text("  ");
        assert_eq!(body(&[block]), "\\{@literal@  \\@literal@}\n");
    }

    #[test]
    fn test_page_break_line() {
        let blocks = [
            Block::empty().with_text("a"),
            Block::new(BlockFormat::default().with_page_break()).with_text("b"),
            Block::new(BlockFormat::default().with_page_break()),
        ];
        assert_eq!(body(&blocks), "a\n\\{p}\nb\n\\{p}\n\n");
    }

    #[test]
    fn test_empty_runs_and_line_breaks_stay_on_one_line() {
        let block = Block {
            format: BlockFormat::default(),
            runs: vec![Run::plain("a\nb"), Run::new("", CharStyle::plain().bold())],
        };
        assert_eq!(body(&[block]), "a\u{2028}b\n");

        let only_empty = Block {
            format: BlockFormat::default(),
            runs: vec![Run::new("", CharStyle::plain().italic())],
        };
        assert_eq!(body(&[only_empty]), "\n");
    }

    #[test]
    fn test_empty_document_is_header_only() {
        assert_eq!(encode_blocks(std::iter::empty()), "::BLM1::\n");
    }
}
