//! Decoding tests for BLM (BLM → document)

use crate::common::{decode_body, events_for};
use blm_babel::formats::blm::decode_str;
use blm_babel::{
    Alignment, Block, BlockFormat, BlmReader, CharStyle, Cursor, DecodeError, Document,
    EventRecorder,
};

#[test]
fn test_blank_line_separates_paragraphs() {
    let doc = decode_str("::BLM1::\nhello\n\nworld\n").unwrap();
    assert_eq!(
        doc.blocks,
        vec![
            Block::empty().with_text("hello"),
            Block::empty(),
            Block::empty().with_text("world"),
        ]
    );
}

#[test]
fn test_leading_blank_line_uses_initial_block() {
    let doc = decode_body("\nhello\n");
    assert_eq!(
        doc.blocks,
        vec![Block::empty(), Block::empty().with_text("hello")]
    );
}

#[test]
fn test_nested_alignment_is_consumed() {
    let doc = decode_body("\\{l\\{r hello \\r}\\l}\n");
    assert_eq!(doc.blocks, vec![Block::empty().with_text(" hello ")]);
}

#[test]
fn test_inline_nesting() {
    let doc = decode_body("\\{b\\{i bold-italic \\i}\\b} \n");
    assert_eq!(
        doc.blocks,
        vec![Block::empty()
            .with_run(" bold-italic ", CharStyle::plain().bold().italic())
            .with_text(" ")]
    );
}

#[test]
fn test_page_break_discards_open_regions() {
    let doc = decode_body("\\{c\\{b before\n\\{p}after\n");
    assert_eq!(
        doc.blocks,
        vec![
            Block::new(BlockFormat::aligned(Alignment::Center))
                .with_run(" before", CharStyle::plain().bold()),
            Block::new(BlockFormat::default().with_page_break()).with_text("after"),
        ]
    );
}

#[test]
fn test_page_break_events() {
    assert_eq!(
        events_for("a\n\\{p}\nb\n"),
        "begin-batch\n\
         merge-block left\n\
         text \"a\"\n\
         insert-block left page-break\n\
         merge-block left page-break\n\
         text \"b\"\n\
         end-batch\n"
    );
}

#[test]
fn test_heading_on_one_line() {
    let doc = decode_body("\\{h2 Title \\h2}\n");
    assert_eq!(
        doc.blocks,
        vec![Block::new(BlockFormat::default().with_heading(2)).with_text(" Title ")]
    );
}

#[test]
fn test_nested_heading_is_ignored() {
    let doc = decode_body("\\{h2 Title \\{h3 sub\\h3} end\\h2}\nnext\n");
    assert_eq!(
        doc.blocks,
        vec![
            Block::new(BlockFormat::default().with_heading(2)).with_text(" Title  sub end"),
            Block::empty().with_text("next"),
        ]
    );
}

#[test]
fn test_out_of_range_heading_is_ignored() {
    let doc = decode_body("\\{h7x\\h7}\n");
    assert_eq!(doc.blocks, vec![Block::empty().with_text("x")]);
}

#[test]
fn test_malformed_tokens_are_text() {
    let doc = decode_body("\\{h x \\{z} \\q}\n");
    assert_eq!(doc.blocks, vec![Block::empty().with_text("\\{h x \\{z} \\q}")]);
}

#[test]
fn test_indent_saturates() {
    let doc = decode_body("\\{r12x\\r}\n");
    assert_eq!(
        doc.blocks,
        vec![Block::new(BlockFormat::aligned(Alignment::Right).with_indent(9)).with_text("x")]
    );
}

#[test]
fn test_literal_span_is_copied_verbatim() {
    let doc = decode_body("a\\{@literal@\\{b\\@literal@}c\n");
    assert_eq!(doc.blocks, vec![Block::empty().with_text("a\\{bc")]);
}

#[test]
fn test_control_only_lines_leave_document_untouched() {
    assert_eq!(decode_body("\\{c\n\\c}\n"), Document::new());
}

#[test]
fn test_decode_continues_host_document() {
    let mut doc = Document::from_blocks(vec![Block::empty().with_text("Intro: ")]);
    let mut cursor = Cursor::new(&mut doc);
    BlmReader::read("::BLM1::\n\\{bmore\\b}\nnext\n".as_bytes(), &mut cursor).unwrap();

    assert_eq!(
        doc.blocks,
        vec![
            Block::empty()
                .with_text("Intro: ")
                .with_run("more", CharStyle::plain().bold()),
            Block::empty().with_text("next"),
        ]
    );
}

#[test]
fn test_decode_inherits_host_char_style() {
    let mut recorder =
        EventRecorder::with_initial(BlockFormat::aligned(Alignment::Center), CharStyle::plain().italic());
    BlmReader::read("::BLM1::\nx\n".as_bytes(), &mut recorder).unwrap();
    assert_eq!(
        recorder.to_text(),
        "begin-batch\nmerge-block left\ntext \"x\" [italic]\nend-batch\n"
    );
}

#[test]
fn test_header_errors() {
    assert_eq!(
        decode_str("").unwrap_err().to_string(),
        "Invalid BLM file: missing header"
    );
    let err = decode_str("hello\nworld\n").unwrap_err();
    assert!(matches!(err, DecodeError::FormatMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "Invalid BLM file: unexpected header 'hello'"
    );
}
