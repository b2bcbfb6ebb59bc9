//! Error types shared by the codec, string, and streaming layers.
//!
//! The taxonomy keeps "feed me more data" ([`EncodingError::BufferTooSmall`])
//! distinct from "this data is corrupt" ([`EncodingError::Malformed`]): the
//! first is retryable by supplying more input or output space, the second is
//! not. The streaming layer adds [`StreamError::IncompleteChar`] for the
//! boundary case where a stream ends inside a character, which would
//! otherwise be indistinguishable from a clean end of stream.

use thiserror::Error;

/// Errors produced by codec, cursor, and string operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Validation or decoding failed on data that cannot be a character of
    /// the bound format. Not retryable.
    #[error("malformed character")]
    Malformed,

    /// Not enough input bytes or output space. Retry with at least `needed`
    /// bytes.
    #[error("buffer too small, need at least {needed} bytes")]
    BufferTooSmall {
        /// Minimum total byte count the failed operation requires.
        needed: usize,
    },

    /// The codec was asked for a Unicode conversion it does not support.
    #[error("encoding does not support Unicode conversion")]
    UnsupportedConversion,

    /// The value cannot be represented by the target codec.
    #[error("invalid code point U+{0:04X}")]
    InvalidCodePoint(u32),

    /// An explicit character count did not match the byte range it was
    /// paired with.
    #[error("character count does not match byte range")]
    LengthMismatch,
}

/// Errors produced by the streaming character I/O adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError<E> {
    /// The stream carried data the bound codec rejects.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The stream ended in the middle of one character: truncated input,
    /// as opposed to a clean end of stream at a character boundary.
    #[error("incomplete character at stream boundary")]
    IncompleteChar,

    /// The raw byte stream reported a hard error.
    #[error("raw stream error")]
    Io(E),
}
