//! Literal protection for plain text.
//!
//! Any substring of run text that [`scan_token`] would read as markup is
//! wrapped in `\{@literal@ … \@literal@}` so the decoder copies it verbatim.
//! The literal open marker is itself a token, so text containing it is
//! wrapped like any other match and reads back as itself. The close marker
//! is not a token outside a literal span and never needs protection.

use super::grammar::{scan_token, LITERAL_CLOSE, LITERAL_OPEN};
use std::borrow::Cow;

/// Escapes `text` for writing inside a BLM text line.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len());
    let mut changed = false;
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some((_, len)) = scan_token(rest) {
            output.push_str(LITERAL_OPEN);
            output.push_str(&rest[..len]);
            output.push_str(LITERAL_CLOSE);
            rest = &rest[len..];
            changed = true;
        } else {
            output.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    if changed {
        Cow::Owned(output)
    } else {
        Cow::Borrowed(text)
    }
}

/// A text line that is blank once trimmed would be read back as a paragraph
/// break, so whitespace-only content is wrapped whole in a literal span.
pub fn protect_blank_line(line: &str) -> Cow<'_, str> {
    if line.trim().is_empty() && !line.is_empty() {
        Cow::Owned(format!("{LITERAL_OPEN}{line}{LITERAL_CLOSE}"))
    } else {
        Cow::Borrowed(line)
    }
}
