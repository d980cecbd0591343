//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document model and various text representations.

pub mod blm;
pub mod icons;
pub mod json;
pub mod text;
pub mod treeviz;

pub use blm::{BlmFormat, BlmReader, BlmWriter};
pub use json::JsonFormat;
pub use text::TextFormat;
pub use treeviz::{TreevizFormat, TreevizOptions};
