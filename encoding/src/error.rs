use thiserror::Error;

/// Errors arising from decoding canonical bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("input ends before the value is complete")]
    Truncated,

    #[error("{0} trailing bytes after the top-level value")]
    TrailingBytes(usize),

    #[error("unsupported type marker 0x{0:02x}")]
    UnknownMarker(u8),

    #[error("map key is not a string")]
    InvalidMapKey,

    #[error("string value is not valid UTF-8")]
    InvalidUtf8,
}
