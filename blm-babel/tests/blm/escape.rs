//! Literal protection tests

use crate::common::decode_body;
use blm_babel::formats::blm::escape::escape_text;
use blm_babel::{encode_document, Block, CharStyle, Document};

fn reencode(text: &str, style: CharStyle) -> String {
    let doc = Document::from_blocks(vec![Block::empty().with_run(text, style)]);
    blm_babel::decode_str(&encode_document(&doc))
        .unwrap()
        .text()
}

#[test]
fn test_token_like_text_survives() {
    for text in [
        "\\{b",
        "\\b}",
        "\\{p}",
        "\\{c12 centered?",
        "\\{h12",
        "a \\{i not italic \\i} b",
        "\\{@literal@",
        "\\@literal@}",
        "\\{@literal@\\{b\\@literal@}",
        "trailing backslash \\",
        "\\\\{u",
    ] {
        assert_eq!(reencode(text, CharStyle::plain()), text, "plain {text:?}");
        assert_eq!(
            reencode(text, CharStyle::plain().bold()),
            text,
            "bold {text:?}"
        );
    }
}

#[test]
fn test_literal_marker_is_wrapped_once() {
    assert_eq!(
        escape_text("\\{@literal@"),
        "\\{@literal@\\{@literal@\\@literal@}"
    );
    assert_eq!(escape_text("\\@literal@}"), "\\@literal@}");
}

#[test]
fn test_escaped_text_keeps_its_style() {
    let doc = decode_body("\\{b\\{@literal@\\b}\\@literal@}\\b}\n");
    assert_eq!(
        doc.blocks,
        vec![Block::empty().with_run("\\b}", CharStyle::plain().bold())]
    );
}
