//! JSON conversions

use blm_babel::formats::blm::decode_str;
use blm_babel::FormatRegistry;

#[test]
fn test_blm_through_json_is_lossless() {
    let registry = FormatRegistry::default();
    let doc = decode_str("::BLM1::\n\\{p}\n\\{j3\n\\{h2\na\\{^2\\^}\n\\h2}\n\\j}\n\n").unwrap();
    let json = registry.serialize(&doc, "json").unwrap();
    assert_eq!(registry.parse(&json, "json").unwrap(), doc);
}

#[test]
fn test_json_shape() {
    let registry = FormatRegistry::default();
    let doc = decode_str("::BLM1::\n\\{r\n\\{ihi\\i}\n\\r}\n").unwrap();
    let json = registry.serialize(&doc, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["blocks"][0]["format"]["alignment"], "right");
    assert_eq!(value["blocks"][0]["runs"][0]["text"], "hi");
    assert_eq!(value["blocks"][0]["runs"][0]["style"]["italic"], true);
}

#[test]
fn test_hand_written_json_survives_blm() {
    let registry = FormatRegistry::default();
    let json = r#"{"blocks":[
        {"runs":[{"text":"a\nb"},{"text":"","style":{"bold":true}},{"text":"c"}]},
        {"format":{"alignment":"center"},"runs":[]},
        {"runs":[{"text":"x","style":{"italic":true}},{"text":"y","style":{"italic":true}}]}
    ]}"#;
    let doc = registry.parse(json, "json").unwrap();
    let blm = registry.serialize(&doc, "blm").unwrap();
    assert_eq!(blm, "::BLM1::\na\u{2028}bc\n\n\\{ixy\\i}\n");
    assert_eq!(registry.parse(&blm, "blm").unwrap(), doc);
}
