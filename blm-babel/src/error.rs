//! Error types for format operations

use std::fmt;
use std::io;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors raised while reading a BLM stream.
///
/// Malformed markup is never an error: it degrades to literal text. The only
/// hard failure is a stream that does not start with the BLM header.
#[derive(Debug)]
pub enum DecodeError {
    /// The first line is not the BLM header; nothing was decoded.
    FormatMismatch { found: String },
    /// The underlying stream failed.
    Io(io::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::FormatMismatch { found } if found.is_empty() => {
                write!(f, "Invalid BLM file: missing header")
            }
            DecodeError::FormatMismatch { found } => {
                write!(f, "Invalid BLM file: unexpected header '{found}'")
            }
            DecodeError::Io(err) => write!(f, "Could not read BLM stream: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io(err) => Some(err),
            DecodeError::FormatMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        DecodeError::Io(err)
    }
}

impl From<DecodeError> for FormatError {
    fn from(err: DecodeError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}

/// Errors raised while writing a BLM stream. Encoding itself is total.
#[derive(Debug)]
pub enum EncodeError {
    Io(io::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Io(err) => write!(f, "Could not write BLM stream: {err}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for EncodeError {
    fn from(err: io::Error) -> Self {
        EncodeError::Io(err)
    }
}
