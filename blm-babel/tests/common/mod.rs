//! Shared helpers for the integration tests.

use blm_babel::formats::blm::decode_str;
use blm_babel::{Document, EventRecorder};

/// Decodes a BLM body, prepending the header line.
pub fn decode_body(body: &str) -> Document {
    decode_str(&format!("::BLM1::\n{body}")).expect("header is present")
}

/// Decodes a BLM body into the textual event log.
pub fn events_for(body: &str) -> String {
    let mut recorder = EventRecorder::new();
    blm_babel::BlmReader::read(format!("::BLM1::\n{body}").as_bytes(), &mut recorder)
        .expect("header is present");
    recorder.to_text()
}

/// Strips the header line from encoder output.
pub fn body_of(encoded: &str) -> &str {
    encoded
        .strip_prefix("::BLM1::\n")
        .expect("encoder writes the header first")
}
