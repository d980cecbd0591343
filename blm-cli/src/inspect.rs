//! Inspect views
//!
//! Each view renders a decoded BLM file for debugging:
//!
//! - `treeviz`: tree visualization of the document model (default)
//! - `events`: the raw builder calls the decoder makes, one per line
//! - `json`: the document model as JSON
//!
//! ## Extra Parameters
//!
//! The treeviz view accepts `show-styles` and `max-label-width` via
//! `--extra-<name> [value]`. The other views take no parameters.
//!
//! Example: `blm inspect file.blm treeviz --extra-max-label-width 0`

use blm_babel::formats::treeviz::{to_treeviz_str_with_params, TreevizOptions};
use blm_babel::{BlmReader, Cursor, Document, EventRecorder};
use std::collections::HashMap;

/// All available inspect views
pub const AVAILABLE_VIEWS: &[&str] = &["treeviz", "events", "json"];

/// Render `source` (a BLM stream) through the named view
///
/// # Returns
///
/// The rendered output, or an error message
pub fn execute_view(
    source: &str,
    view_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    tracing::debug!(view = view_name, "rendering inspect view");

    match view_name {
        "treeviz" => {
            let doc = decode(source)?;
            to_treeviz_str_with_params(&doc, extra_params).map_err(|e| e.to_string())
        }
        "events" => {
            reject_params(view_name, extra_params)?;
            let mut recorder = EventRecorder::new();
            BlmReader::read(source.as_bytes(), &mut recorder).map_err(|e| e.to_string())?;
            Ok(recorder.to_text())
        }
        "json" => {
            reject_params(view_name, extra_params)?;
            let doc = decode(source)?;
            serde_json::to_string_pretty(&doc)
                .map(|json| json + "\n")
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        _ => Err(format!(
            "Unknown view '{view_name}'. Available views: {}",
            AVAILABLE_VIEWS.join(", ")
        )),
    }
}

/// Treeviz parameters as configured, before `--extra-*` overrides.
pub fn treeviz_params(options: &TreevizOptions) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.insert("show-styles".to_string(), options.show_styles.to_string());
    params.insert(
        "max-label-width".to_string(),
        options.max_label_width.to_string(),
    );
    params
}

fn decode(source: &str) -> Result<Document, String> {
    let mut doc = Document::new();
    let mut cursor = Cursor::new(&mut doc);
    BlmReader::read(source.as_bytes(), &mut cursor).map_err(|e| e.to_string())?;
    Ok(doc)
}

fn reject_params(view_name: &str, params: &HashMap<String, String>) -> Result<(), String> {
    if params.is_empty() {
        return Ok(());
    }
    let mut keys: Vec<_> = params.keys().cloned().collect();
    keys.sort();
    Err(format!(
        "View '{view_name}' does not take parameters: {}",
        keys.join(", ")
    ))
}
