//! Support code for the `blm` binary: inspect views and logging setup.

pub mod inspect;
pub mod logging;
