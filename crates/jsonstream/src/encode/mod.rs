//! Encoding pipeline: classify each composite, then stream its tokens into a sink.

pub mod encoders;
pub mod primitives;
pub mod shape;
pub mod writer;
