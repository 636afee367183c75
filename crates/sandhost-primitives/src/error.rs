//! Parse errors for text supplied by users of the primitive types

use crate::address::AddressError;
use crate::hash::HashError;
use thiserror::Error;

/// Failure to read an address, a word or a byte string from hex text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Not a 20-byte address
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),
    /// Not a 32-byte word
    #[error("invalid word: {0}")]
    Word(#[from] HashError),
    /// Not a hex byte string
    #[error("invalid hex: {0}")]
    Hex(String),
}
