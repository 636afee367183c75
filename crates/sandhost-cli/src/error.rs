//! CLI error types

use sandhost_codec::CodecError;
use sandhost_evm::HostError;
use sandhost_primitives::PrimitiveError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad hex, address or word argument
    #[error("Parse error: {0}")]
    Primitive(#[from] PrimitiveError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Wire format error
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Config error
    #[error("Config error: {0}")]
    Config(#[from] HostError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
