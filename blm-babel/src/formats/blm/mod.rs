//! BLM format implementation
//!
//! BLM is a line-based markup for rich text. A stream starts with the header
//! line `::BLM1::`; every following line is either blank (a paragraph break),
//! a control line, or the text line of one block. See [`grammar`] for the
//! token table.
//!
//! # Element Mapping Table
//!
//! | Model                    | BLM                                    |
//! |--------------------------|----------------------------------------|
//! | Empty block              | blank line                             |
//! | Block alignment/indent   | `\{c2` … `\c}` around the text line    |
//! | Block heading level      | `\{h1` … `\h1}` around the text line   |
//! | Page break before block  | `\{p}` line                            |
//! | Bold/italic/…            | `\{b` … `\b}` inside the text line     |
//! | Token-like text          | `\{@literal@` … `\@literal@}`          |
//!
//! # Escaping scheme
//!
//! Only the delimiter-pair literal scheme is implemented, under the `::BLM1::`
//! header. A different literal scheme would need its own header version.
//!
//! # Round trip
//!
//! For every normalized document (see [`Document::normalized`]), decoding the
//! encoded text gives back an equal document.

pub mod decoder;
pub mod encoder;
pub mod escape;
pub mod grammar;

use crate::error::{DecodeError, EncodeError, FormatError};
use crate::format::Format;
use crate::model::builder::{Cursor, DocumentBuilder};
use crate::model::nodes::Document;
use decoder::Decoder;
use grammar::MAGIC;
use std::io::{self, BufRead, Read, Write};

pub use encoder::{encode_blocks, encode_document};

/// Longest header line read before giving up on a stream.
const HEADER_LIMIT: u64 = 256;

/// Reads BLM streams into a [`DocumentBuilder`].
pub struct BlmReader;

impl BlmReader {
    /// Peeks at the buffered bytes for the BLM header without consuming them.
    ///
    /// Only what the reader already buffers is inspected. When that is a
    /// proper prefix of the header (a slow pipe may deliver a single byte)
    /// the answer is optimistic; [`BlmReader::read`] makes the final call.
    pub fn can_read<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<bool> {
        let buffered = reader.fill_buf()?;
        let magic = MAGIC.as_bytes();
        if buffered.len() >= magic.len() {
            Ok(buffered.starts_with(magic))
        } else {
            Ok(!buffered.is_empty() && magic.starts_with(buffered))
        }
    }

    /// Decodes a whole stream into `builder` as a single edit batch.
    ///
    /// A stream without the header leaves the builder untouched.
    pub fn read<R, B>(mut reader: R, builder: &mut B) -> Result<(), DecodeError>
    where
        R: BufRead,
        B: DocumentBuilder,
    {
        let mut line = Vec::new();
        reader
            .by_ref()
            .take(HEADER_LIMIT)
            .read_until(b'\n', &mut line)?;
        let header = String::from_utf8_lossy(&line);
        let header = header.trim_end_matches(&['\r', '\n'][..]);
        if header != MAGIC {
            let found: String = header.chars().take(64).collect();
            tracing::debug!(%found, "not a BLM stream");
            return Err(DecodeError::FormatMismatch { found });
        }

        let mut body = String::new();
        reader.read_to_string(&mut body)?;

        builder.begin_batch();
        Decoder::new(builder).decode(&body);
        builder.end_batch();
        Ok(())
    }
}

/// Decodes BLM text into a fresh [`Document`].
pub fn decode_str(source: &str) -> Result<Document, DecodeError> {
    let mut doc = Document::new();
    let mut cursor = Cursor::new(&mut doc);
    BlmReader::read(source.as_bytes(), &mut cursor)?;
    Ok(doc)
}

/// Writes documents as BLM streams.
pub struct BlmWriter;

impl BlmWriter {
    pub fn write<W: Write>(mut out: W, doc: &Document) -> Result<(), EncodeError> {
        out.write_all(encode_document(doc).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Format implementation for BLM
#[derive(Debug, Default, Clone, Copy)]
pub struct BlmFormat;

impl Format for BlmFormat {
    fn name(&self) -> &str {
        "blm"
    }

    fn description(&self) -> &str {
        "BLM rich-text markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["blm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn sniff(&self, source: &str) -> bool {
        source.starts_with(MAGIC)
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        decode_str(source).map_err(FormatError::from)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(encode_document(doc))
    }
}
