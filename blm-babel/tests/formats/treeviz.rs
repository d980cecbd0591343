//! Treeviz output for decoded documents

use blm_babel::formats::blm::decode_str;
use blm_babel::FormatRegistry;
use insta::assert_snapshot;

#[test]
fn test_treeviz_of_decoded_document() {
    let doc = decode_str(
        "::BLM1::\n\\{c\n\\{h1\nA \\{bbold\\b} title\n\\h1}\n\\c}\n\n\\{p}\n\\{l2\nx\\{_2\\_}\n\\l}\n",
    )
    .unwrap();
    let output = FormatRegistry::default().serialize(&doc, "treeviz").unwrap();
    assert_snapshot!(output, @r#"
    ⧉ Document (3 blocks)
    ├─ § A bold title [center h1]
    │ ├─ ◦ "A "
    │ ├─ 𝐁 "bold" [bold]
    │ └─ ◦ " title"
    ├─ ⎯ (empty)
    ├─ ⤓ page break
    └─ ¶ x2 [indent 2]
      ├─ ◦ "x"
      └─ ◦ "2" [subscript]
    "#);
}
