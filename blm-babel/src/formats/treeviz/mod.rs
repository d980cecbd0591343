//! Treeviz formatter for documents
//!
//! Treeviz is a visual representation of the document model, one node per
//! line. Blocks hang off the document, runs hang off their block.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> [<attributes>]
//!
//! Example:
//!
//! ⧉ Document (3 blocks)
//! ├─ § Title [center h1]
//! │ └─ 𝐁 "Title" [bold]
//! ├─ ⎯ (empty)
//! ├─ ⤓ page break
//! └─ ¶ Hello world
//!   ├─ ◦ "Hello "
//!   └─ 𝐼 "world" [italic]
//!
//! Block labels are the block's text, run labels are quoted so surrounding
//! whitespace stays visible. Labels longer than `max-label-width` characters
//! are cut and end with `…`.
//!
//! Icons
//!     Document: ⧉
//!     Paragraph: ¶
//!     Heading: §
//!     EmptyBlock: ⎯
//!     PageBreak: ⤓
//!     Run: ◦ (𝐁 when bold, 𝐼 when italic)

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::{bool_option, reject_unknown_options, Format};
use crate::model::nodes::{Alignment, Block, CharStyle, Document, Run};
use std::collections::HashMap;

const SHOW_STYLES: &str = "show-styles";
const MAX_LABEL_WIDTH: &str = "max-label-width";

/// Rendering knobs for treeviz output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    /// Append block and character attributes in brackets.
    pub show_styles: bool,
    /// Maximum label length in characters; 0 disables truncation.
    pub max_label_width: usize,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            show_styles: true,
            max_label_width: 30,
        }
    }
}

impl TreevizOptions {
    /// Overlays string parameters (as passed by `--extra-*`) on these options.
    pub fn with_params(mut self, params: &HashMap<String, String>) -> Result<Self, FormatError> {
        reject_unknown_options("treeviz", params, &[SHOW_STYLES, MAX_LABEL_WIDTH])?;
        if let Some(show) = bool_option(params, SHOW_STYLES) {
            self.show_styles = show;
        }
        if let Some(width) = params.get(MAX_LABEL_WIDTH) {
            self.max_label_width = width.parse().map_err(|_| {
                FormatError::SerializationError(format!(
                    "Invalid value '{width}' for {MAX_LABEL_WIDTH}: expected a number"
                ))
            })?;
        }
        Ok(self)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if max == 0 || text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn block_attributes(block: &Block) -> Vec<String> {
    let mut attributes = Vec::new();
    if block.format.alignment != Alignment::Left {
        attributes.push(block.format.alignment.name().to_string());
    }
    if block.format.indent > 0 {
        attributes.push(format!("indent {}", block.format.indent));
    }
    if block.format.heading > 0 {
        attributes.push(format!("h{}", block.format.heading));
    }
    attributes
}

fn style_attributes(style: &CharStyle) -> Vec<String> {
    style.flags().map(|flag| flag.name().to_string()).collect()
}

fn bracketed(attributes: Vec<String>, show: bool) -> String {
    if !show || attributes.is_empty() {
        String::new()
    } else {
        format!(" [{}]", attributes.join(" "))
    }
}

fn block_icon(block: &Block) -> &'static str {
    if block.is_empty() {
        get_icon("EmptyBlock")
    } else if block.format.heading > 0 {
        get_icon("Heading")
    } else {
        get_icon("Paragraph")
    }
}

fn run_icon(run: &Run) -> &'static str {
    if run.style.bold {
        get_icon("Bold")
    } else if run.style.italic {
        get_icon("Italic")
    } else {
        get_icon("Run")
    }
}

fn format_block(block: &Block, is_last: bool, options: &TreevizOptions) -> String {
    let mut output = String::new();

    if block.format.page_break_before {
        output.push_str(&format!("├─ {} page break\n", get_icon("PageBreak")));
    }

    let connector = if is_last { "└─" } else { "├─" };
    let label = if block.is_empty() {
        "(empty)".to_string()
    } else {
        truncate(&block.text(), options.max_label_width)
    };
    output.push_str(&format!(
        "{} {} {}{}\n",
        connector,
        block_icon(block),
        label,
        bracketed(block_attributes(block), options.show_styles)
    ));

    let child_prefix = if is_last { "  " } else { "│ " };
    for (i, run) in block.runs.iter().enumerate() {
        let connector = if i == block.runs.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        output.push_str(&format!(
            "{}{} {} {:?}{}\n",
            child_prefix,
            connector,
            run_icon(run),
            truncate(&run.text, options.max_label_width),
            bracketed(style_attributes(&run.style), options.show_styles)
        ));
    }

    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_options(doc, &TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(doc: &Document, options: &TreevizOptions) -> String {
    let mut output = format!(
        "{} Document ({} blocks)\n",
        get_icon("Document"),
        doc.blocks.len()
    );
    let count = doc.blocks.len();
    for (i, block) in doc.blocks.iter().enumerate() {
        output.push_str(&format_block(block, i == count - 1, options));
    }
    output
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"show-styles"`: `"false"` hides the bracketed attribute lists.
/// - `"max-label-width"`: label truncation width, `"0"` for none.
pub fn to_treeviz_str_with_params(
    doc: &Document,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    let options = TreevizOptions::default().with_params(params)?;
    Ok(to_treeviz_str_with_options(doc, &options))
}

/// Format implementation for treeviz format
#[derive(Debug, Default, Clone, Copy)]
pub struct TreevizFormat {
    options: TreevizOptions,
}

impl TreevizFormat {
    pub fn new(options: TreevizOptions) -> Self {
        Self { options }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options.with_params(options)?;
        Ok(to_treeviz_str_with_options(doc, &options))
    }
}
