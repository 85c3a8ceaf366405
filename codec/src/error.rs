//! Error types for wire encoding and decoding.
//!
//! Protocol errors are fatal to the current decode: a descriptor stream that
//! ends mid-record or declares impossible lengths cannot be partially
//! recovered, so every failure here propagates to the caller.

use thiserror::Error;

/// Errors that can occur while reading or writing descriptor bytes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying read or write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the named field was complete.
    #[error("descriptor stream ended early while reading {0}")]
    Truncated(&'static str),

    /// A length prefix claims more bytes than the payload still holds.
    #[error("declared length {declared} exceeds {remaining} remaining bytes")]
    LengthOverrun { declared: u64, remaining: u64 },

    /// A text field held bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in {0}")]
    InvalidText(&'static str),
}

/// Convenience alias for results with [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
