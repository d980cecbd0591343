//! Plain text conversions

use blm_babel::formats::blm::decode_str;
use blm_babel::{encode_document, Block, FormatRegistry};
use std::collections::HashMap;

#[test]
fn test_text_to_blm() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("First line\n\nSecond \\{b line\n", "text").unwrap();
    assert_eq!(
        registry.serialize(&doc, "blm").unwrap(),
        "::BLM1::\nFirst line\n\nSecond \\{@literal@\\{b\\@literal@} line\n"
    );
}

#[test]
fn test_blm_to_text_drops_markup() {
    let registry = FormatRegistry::default();
    let doc = decode_str("::BLM1::\n\\{c\n\\{h1\n\\{bTitle\\b}\n\\h1}\n\\c}\n\nBody\n").unwrap();
    assert_eq!(registry.serialize(&doc, "text").unwrap(), "Title\n\nBody\n");
}

#[test]
fn test_blank_line_option_through_registry() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("a\nb\n", "text").unwrap();
    let mut options = HashMap::new();
    options.insert("blank-line-between-blocks".to_string(), "true".to_string());
    assert_eq!(
        registry.serialize_with_options(&doc, "text", &options).unwrap(),
        "a\n\nb\n"
    );
}

#[test]
fn test_text_roundtrips_through_blm() {
    let registry = FormatRegistry::default();
    let source = "plain \\{p} words\n  indented\n\nend\n";
    let doc = registry.parse(source, "text").unwrap();
    let back = decode_str(&encode_document(&doc)).unwrap();
    assert_eq!(back, doc);
    assert_eq!(back.blocks[1], Block::empty().with_text("  indented"));
    assert_eq!(registry.serialize(&back, "text").unwrap(), source);
}
