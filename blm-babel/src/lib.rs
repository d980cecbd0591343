//! BLM codec and format interoperability
//!
//!     This crate reads and writes BLM, a line-based markup for rich text, and converts between
//!     the in-memory document model and a few auxiliary representations (plain text, JSON and
//!     a treeviz dump for inspection).
//!
//!     This is a pure lib, that is, it powers blm-cli but is shell agnostic: no code here should
//!     suppose a shell environment, be it std printing, env vars etc. Diagnostics go through
//!     `tracing`, and it is up to the binary to install a subscriber.
//!
//! Architecture
//!
//!     The document model (./model) is a flat list of blocks, each holding runs of text that share
//!     one character style. The decoder never builds a document directly: it drives a
//!     DocumentBuilder, which is either a Cursor over a Document or an EventRecorder used by tests
//!     and the `inspect events` command.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── model
//!     │   ├── nodes.rs            # Document, Block, Run, styles
//!     │   ├── builder.rs          # DocumentBuilder trait and Cursor
//!     │   └── events.rs           # EventRecorder
//!     ├── formats
//!     │   ├── blm
//!     │   │   ├── grammar.rs      # Token table and scanner
//!     │   │   ├── escape.rs       # Literal protection of token-like text
//!     │   │   ├── decoder.rs      # Line state machine
//!     │   │   ├── encoder.rs      # Block and run serialization
//!     │   │   └── mod.rs          # BlmReader, BlmWriter, BlmFormat
//!     │   ├── text
//!     │   ├── json
//!     │   └── treeviz
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Decoding Is Total
//!
//!     Past the header check, nothing a BLM stream contains can make decoding fail. Unknown or
//!     unbalanced markup is kept as literal text or silently ignored, so a damaged file still
//!     opens with as much formatting as can be recovered.

pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;

pub use error::{DecodeError, EncodeError, FormatError};
pub use format::Format;
pub use formats::blm::{decode_str, encode_document, BlmFormat, BlmReader, BlmWriter};
pub use model::builder::{Cursor, DocumentBuilder};
pub use model::events::{Event, EventRecorder};
pub use model::nodes::{
    Alignment, Block, BlockFormat, CharStyle, Document, Run, StyleFlag, VerticalAlign,
};
pub use registry::FormatRegistry;
