//! BLM codec tests
//!
//! Decoding, encoding and the round-trip guarantees between them.

mod decode;
mod encode;
mod escape;
mod roundtrip;
