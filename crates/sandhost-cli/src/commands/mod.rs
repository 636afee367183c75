//! Command implementations

pub mod decode;
pub mod encode;

use crate::CliError;
use sandhost_primitives::{decode_hex, Address, PrimitiveError, H256};

/// Parse hex with or without a 0x prefix
pub fn parse_hex(s: &str) -> Result<Vec<u8>, CliError> {
    Ok(decode_hex(s)?)
}

/// Parse a 20-byte address
pub fn parse_address(s: &str) -> Result<Address, CliError> {
    Address::from_hex(s.trim())
        .map_err(PrimitiveError::from)
        .map_err(CliError::from)
}

/// Parse a 32-byte word
pub fn parse_word(s: &str) -> Result<H256, CliError> {
    H256::from_hex(s.trim())
        .map_err(PrimitiveError::from)
        .map_err(CliError::from)
}
