//! Document model shared by every format.
//!
//! The model is deliberately flat: a document is a list of blocks, a block a
//! list of styled runs. Decoders do not build it directly but talk to a
//! [`builder::DocumentBuilder`], so the same decoder can fill a host editor's
//! buffer, an in-memory [`nodes::Document`] or an [`events::EventRecorder`].

pub mod builder;
pub mod events;
pub mod nodes;
