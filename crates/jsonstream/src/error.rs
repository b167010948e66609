use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
pub enum Error {
    /// The destination was rejected when the encoder was built.
    #[error("invalid sink: {0}")]
    InvalidSink(#[source] io::Error),

    /// A write failed mid-document; the sink holds a truncated prefix.
    #[error("unwritable sink: {0}")]
    UnwritableSink(#[source] io::Error),

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("cyclic value: a shared value contains itself")]
    CyclicValue,
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: core::fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }
}
