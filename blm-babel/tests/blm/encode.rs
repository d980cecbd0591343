//! Encoding tests for BLM (document → BLM)

use crate::common::{body_of, decode_body};
use blm_babel::{encode_document, Alignment, Block, BlockFormat, BlmWriter, CharStyle, Document};

fn encode_body(blocks: Vec<Block>) -> String {
    body_of(&encode_document(&Document::from_blocks(blocks))).to_string()
}

#[test]
fn test_inline_tags_reencode_in_canonical_order() {
    let doc = decode_body("\\{b\\{i bold-italic \\i}\\b} \n");
    assert_eq!(
        body_of(&encode_document(&doc)),
        "\\{b\\{i bold-italic \\i}\\b} \n"
    );
}

#[test]
fn test_opens_follow_canonical_order_regardless_of_construction() {
    let style = CharStyle::plain().subscript().strike().bold();
    assert_eq!(
        encode_body(vec![Block::empty().with_run("x", style)]),
        "\\{b\\{s\\{_x\\_}\\s}\\b}\n"
    );
}

#[test]
fn test_turning_off_an_outer_flag_reopens_inner_ones() {
    let block = Block::empty()
        .with_run("a", CharStyle::plain().bold())
        .with_run("b", CharStyle::plain().bold().italic())
        .with_run("c", CharStyle::plain().italic());
    assert_eq!(
        encode_body(vec![block]),
        "\\{ba\\{ib\\i}\\b}\\{ic\\i}\n"
    );
}

#[test]
fn test_superscript_then_subscript() {
    let block = Block::empty()
        .with_run("x", CharStyle::plain().superscript())
        .with_run("y", CharStyle::plain().subscript());
    assert_eq!(encode_body(vec![block]), "\\{^x\\^}\\{_y\\_}\n");
}

#[test]
fn test_block_attributes_are_clamped() {
    let block = Block::new(BlockFormat::aligned(Alignment::Justify).with_indent(15).with_heading(9))
        .with_text("x");
    assert_eq!(encode_body(vec![block]), "\\{j9\n\\{h6\nx\n\\h6}\n\\j}\n");
}

#[test]
fn test_page_break_line_precedes_block() {
    let blocks = vec![
        Block::empty().with_text("a"),
        Block::new(BlockFormat::aligned(Alignment::Right).with_page_break()).with_text("b"),
    ];
    assert_eq!(encode_body(blocks), "a\n\\{p}\n\\{r\nb\n\\r}\n");
}

#[test]
fn test_whitespace_only_block_is_protected() {
    let body = encode_body(vec![Block::empty().with_text("   ")]);
    assert_eq!(body, "\\{@literal@   \\@literal@}\n");
    assert_eq!(decode_body(&body).blocks, vec![Block::empty().with_text("   ")]);
}

#[test]
fn test_writer_matches_encode_document() {
    let doc = Document::from_blocks(vec![
        Block::new(BlockFormat::default().with_heading(1)).with_text("Title"),
        Block::empty(),
        Block::empty().with_run("body", CharStyle::plain().underline()),
    ]);
    let mut out = Vec::new();
    BlmWriter::write(&mut out, &doc).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), encode_document(&doc));
    assert_eq!(
        encode_document(&doc),
        "::BLM1::\n\\{h1\nTitle\n\\h1}\n\n\\{ubody\\u}\n"
    );
}
