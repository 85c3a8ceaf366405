//! Error types for argument parsing and validation.

use thiserror::Error;

/// Errors raised while parsing or validating command-line arguments.
///
/// Every variant renders as the exact diagnostic line a program prints to its
/// error stream before refusing to run. The `Display` strings are part of the
/// observable contract and are matched verbatim by downstream tooling.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// A leading token matched no registered option name.
    #[error("Unknown command line argument: {0}")]
    UnknownArgument(String),
    /// A value-taking option was the last token on the line.
    ///
    /// `kind` is the option family name as printed: `Integer`, `Float`
    /// or `String`.
    #[error("{kind} option {name} requires a value.")]
    MissingValue { kind: &'static str, name: String },
    /// A numeric value token failed literal validation.
    ///
    /// `kind` is the literal family as printed: `integer` or `float`.
    #[error("Malformed {kind} value ({token}) for {name}")]
    MalformedValue {
        kind: &'static str,
        token: String,
        name: String,
    },
    /// A post-parse check rejected the parsed state.
    #[error("{0}")]
    Validation(String),
    /// Help, version or descriptor output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Descriptor encoding failed.
    #[error(transparent)]
    Codec(#[from] argwire_codec::CodecError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ArgumentError>;
