//! Auxiliary format tests
//!
//! Conversions between BLM and the text, JSON and treeviz formats, driven
//! through the registry the way the CLI uses it.

mod json;
mod text;
mod treeviz;
