//! Error types shared across the AS-DCP crates.

use thiserror::Error;

/// Codec and track-file errors.
///
/// The reader validates and returns these instead of panicking on malformed
/// input; the writer validates preconditions before mutating the file.
#[derive(Debug, Error)]
#[must_use]
pub enum Error {
    #[error("referenced object not found: {0}")]
    NotFound(&'static str),

    #[error("format error: {0}")]
    Format(String),

    #[error("unexpected UL preamble: {0:02x}.{1:02x}.{2:02x}.{3:02x}")]
    BadPreamble(u8, u8, u8, u8),

    #[error("malformed BER length: {0}")]
    MalformedBer(&'static str),

    #[error("KLV packet length {0} exceeds internal limit")]
    PacketTooLarge(u64),

    #[error("frame number out of range: {0}")]
    OutOfRange(u32),

    #[error("operation not legal in current writer state")]
    State,

    #[error("KLV coding error: {0}")]
    KlvCoding(&'static str),

    #[error("decrypted check value mismatch")]
    CheckFail,

    #[error("frame integrity pack mismatch: {0}")]
    HmacFail(&'static str),

    #[error("encrypted essence requires a cipher context")]
    CryptoCtx,

    #[error("encrypted essence requires an HMAC context")]
    HmacCtx,

    #[error("cannot write an empty frame buffer")]
    EmptyFrame,

    #[error("plaintext offset {offset} exceeds frame size {size}")]
    LargePto { offset: u64, size: u64 },

    #[error("unexpected end of data: need {need} bytes, have {have}")]
    UnexpectedEof { need: usize, have: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
