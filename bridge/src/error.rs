//! Error types for subject probing.

use thiserror::Error;

use argwire_codec::CodecError;

/// Errors raised while launching or talking to a subject program.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The subject command line had no program to run.
    #[error("Subject command is empty.")]
    EmptyCommand,

    /// The subject executable could not be started.
    #[error("Failed to launch {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The subject did not answer within the allowed time.
    #[error("Subject {command} did not finish in time.")]
    Timeout { command: String },

    /// The subject exited abnormally while dumping a program descriptor.
    #[error("Problem getting argument info.")]
    ArgumentInfo {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The subject exited abnormally while dumping a set descriptor.
    #[error("Problem getting set info.")]
    SetInfo {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The subject ran but signalled failure.
    #[error("Problem running program.")]
    RunFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Convenience alias for bridge results.
pub type Result<T> = std::result::Result<T, BridgeError>;
