//! Property tests: decode(encode(doc)) == doc

use blm_babel::formats::blm::decode_str;
use blm_babel::{
    encode_document, Alignment, Block, BlockFormat, CharStyle, Document, Run, VerticalAlign,
};
use proptest::prelude::*;

fn arb_style() -> impl Strategy<Value = CharStyle> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0u8..3,
    )
        .prop_map(|(bold, italic, underline, strike, vertical)| CharStyle {
            bold,
            italic,
            underline,
            strike,
            vertical: match vertical {
                1 => VerticalAlign::Superscript,
                2 => VerticalAlign::Subscript,
                _ => VerticalAlign::Normal,
            },
        })
}

/// Run text biased towards markup-looking fragments.
fn arb_text() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        3 => "[^\\n\\r]{1,6}",
        1 => prop::sample::select(vec![
            "\\", "{", "}", " ", "\t", "7", "\\{b", "\\b}", "\\{c2", "\\c}", "\\{h1", "\\h1}",
            "\\{p}", "\\{@literal@", "\\@literal@}", "\\{^", "\\_}",
        ])
        .prop_map(str::to_string),
    ];
    prop::collection::vec(fragment, 1..5).prop_map(|parts| parts.concat())
}

fn arb_format() -> impl Strategy<Value = BlockFormat> {
    (0u8..4, 0u8..=9, 0u8..=6, any::<bool>()).prop_map(|(alignment, indent, heading, page)| {
        BlockFormat {
            alignment: match alignment {
                1 => Alignment::Right,
                2 => Alignment::Center,
                3 => Alignment::Justify,
                _ => Alignment::Left,
            },
            indent,
            heading,
            page_break_before: page,
        }
    })
}

fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        1 => any::<bool>().prop_map(|page| {
            if page {
                Block::new(BlockFormat::default().with_page_break())
            } else {
                Block::empty()
            }
        }),
        4 => (arb_format(), prop::collection::vec((arb_text(), arb_style()), 1..4)).prop_map(
            |(format, runs)| {
                let mut block = Block::new(format);
                for (text, style) in runs {
                    block.push_run(text, style);
                }
                block
            }
        ),
    ]
}

/// Blocks built field by field, so runs may be empty, split or hold line breaks.
fn arb_raw_block() -> impl Strategy<Value = Block> {
    (
        arb_format(),
        prop::collection::vec(("[a\\\\{}\n\r ]{0,4}", arb_style()), 0..4),
    )
        .prop_map(|(format, runs)| Block {
            format,
            runs: runs
                .into_iter()
                .map(|(text, style)| Run::new(text, style))
                .collect(),
        })
}

fn arb_document() -> impl Strategy<Value = Document> {
    prop::collection::vec(arb_block(), 1..8).prop_map(Document::from_blocks)
}

proptest! {
    #[test]
    fn document_roundtrip(doc in arb_document()) {
        let encoded = encode_document(&doc);
        let decoded = decode_str(&encoded).unwrap();
        prop_assert_eq!(decoded, doc, "encoded:\n{}", encoded);
    }

    #[test]
    fn normalized_document_roundtrip(blocks in prop::collection::vec(arb_raw_block(), 1..6)) {
        let doc = Document::from_blocks(blocks).normalized();
        let decoded = decode_str(&encode_document(&doc)).unwrap();
        prop_assert_eq!(decoded, doc);
    }

    #[test]
    fn plain_text_roundtrip(text in "[^\\n\\r]*") {
        let doc = Document::from_blocks(vec![Block::empty().with_text(text.as_str())]);
        let decoded = decode_str(&encode_document(&doc)).unwrap();
        prop_assert_eq!(decoded.text(), text);
    }

    #[test]
    fn decode_never_fails_after_header(body in "\\PC*") {
        let source = format!("::BLM1::\n{body}");
        prop_assert!(decode_str(&source).is_ok());
    }
}
