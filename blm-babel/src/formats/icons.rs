//! Shared icon mapping for tree visualization formats
//!
//! Treeviz and the CLI inspect views use the same icons so a node reads the
//! same everywhere.

/// Get the Unicode icon for a given document node type
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Paragraph" => "¶",
        "Heading" => "§",
        "EmptyBlock" => "⎯",
        "PageBreak" => "⤓",
        "Run" => "◦",
        "Bold" => "𝐁",
        "Italic" => "𝐼",
        _ => "○",
    }
}
