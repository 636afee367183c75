//! Host error types

use sandhost_codec::CodecError;
use sandhost_primitives::StorageKey;
use sandhost_syscall::BoundaryError;
use thiserror::Error;

/// Host callback errors
#[derive(Debug, Error)]
pub enum HostError {
    /// Encoding or decoding a boundary message failed
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A syscall reported failure
    #[error("boundary error: {0}")]
    Boundary(#[from] BoundaryError),

    /// Storage write after the account self-destructed
    #[error("storage write to {0} after selfdestruct")]
    WriteAfterDestruct(StorageKey),

    /// Invalid configuration
    #[error("invalid config: {0}")]
    Config(String),

    /// Reading configuration failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure category the interpreter can report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A message did not fit its buffer
    BufferOverflow,
    /// The boundary answered with bytes that do not parse
    MalformedResult,
    /// A syscall returned a non-zero status
    BoundaryError,
    /// The host was used out of order
    UsageError,
    /// Configuration could not be loaded
    Config,
}

impl HostError {
    /// Category of this error
    pub fn kind(&self) -> FailureKind {
        match self {
            HostError::Codec(CodecError::BufferOverflow { .. }) => FailureKind::BufferOverflow,
            HostError::Codec(CodecError::MalformedResult(_))
            | HostError::Codec(CodecError::Truncated { .. }) => FailureKind::MalformedResult,
            HostError::Codec(CodecError::MalformedMessage(_))
            | HostError::Codec(CodecError::InvalidCallKind(_)) => FailureKind::UsageError,
            HostError::Boundary(_) => FailureKind::BoundaryError,
            HostError::WriteAfterDestruct(_) => FailureKind::UsageError,
            HostError::Config(_) | HostError::Io(_) => FailureKind::Config,
        }
    }
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;
