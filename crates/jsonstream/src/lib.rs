#![doc = include_str!("../README.md")]

pub mod error;
pub mod value;
pub mod encode;
mod number;

#[cfg(feature = "serde")]
pub mod ser;

pub use crate::encode::encoders::Encoder;
pub use crate::encode::shape::{Shape, classify};
pub use crate::encode::writer::{EchoSink, HandleSink, Sink};
pub use crate::error::{Error, Result};
pub use crate::value::{Key, Map, Shared, Value};

use std::io::Write;

/// Encodes `value` into `writer`, one token per write.
pub fn encode_to_writer<W: Write>(writer: W, value: &Value) -> Result<()> {
    let mut enc = Encoder::new(HandleSink::new(writer))?;
    enc.encode(value)
}

/// Encodes `value` into a new `String`.
pub fn encode_to_string(value: &Value) -> Result<String> {
    let mut enc = Encoder::new(String::new())?;
    enc.encode(value)?;
    Ok(enc.into_inner())
}

#[cfg(feature = "serde")]
pub fn encode_serialize_to_writer<W: Write, T: serde::Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let v = crate::ser::to_value(value)?;
    encode_to_writer(writer, &v)
}

/// Adapts `value` with [`ser::to_value`] and encodes it into a new `String`.
#[cfg(feature = "serde")]
pub fn encode_serialize_to_string<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let v = crate::ser::to_value(value)?;
    encode_to_string(&v)
}
