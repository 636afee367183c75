//! # sandhost-primitives
//!
//! Fixed-width byte types shared by every sandhost crate.
//!
//! Everything that crosses the syscall boundary is either a 20-byte address or
//! a 32-byte word, so these two types are all the bridge needs.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Storage slot key
pub type StorageKey = H256;

/// Storage slot value
pub type StorageValue = H256;

/// Gas type
pub type Gas = u64;

/// Decode a hex byte string, with or without a `0x` prefix.
/// Surrounding whitespace is ignored.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(s).map_err(|e| PrimitiveError::Hex(e.to_string()))
}
