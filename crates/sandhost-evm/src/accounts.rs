//! Account queries

use bytes::Bytes;
use sandhost_primitives::{Address, H256, U256};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;

/// Keccak-256 of empty input
pub const EMPTY_CODE_HASH: H256 = H256::from_bytes([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// Keccak-256 hash
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Source of account existence, balance and code
pub trait AccountProvider {
    /// Whether the account exists
    fn account_exists(&self, address: &Address) -> bool;

    /// Account balance
    fn balance(&self, address: &Address) -> U256;

    /// Account code, empty if none
    fn code(&self, address: &Address) -> &[u8];

    /// Code size in bytes
    fn code_size(&self, address: &Address) -> usize {
        self.code(address).len()
    }

    /// Code hash
    fn code_hash(&self, address: &Address) -> H256;

    /// Copy code starting at `offset` into `buffer`; returns the bytes copied
    fn copy_code(&self, address: &Address, offset: usize, buffer: &mut [u8]) -> usize {
        let code = self.code(address);
        if offset >= code.len() {
            return 0;
        }
        let n = buffer.len().min(code.len() - offset);
        buffer[..n].copy_from_slice(&code[offset..offset + n]);
        n
    }
}

/// Every account exists, is empty and has no code.
///
/// This is all the sandbox can answer without a state backend; the code hash
/// is reported as zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCode;

impl AccountProvider for NoCode {
    fn account_exists(&self, _address: &Address) -> bool {
        true
    }

    fn balance(&self, _address: &Address) -> U256 {
        U256::zero()
    }

    fn code(&self, _address: &Address) -> &[u8] {
        &[]
    }

    fn code_hash(&self, _address: &Address) -> H256 {
        H256::ZERO
    }
}

#[derive(Clone, Debug, Default)]
struct Account {
    balance: U256,
    code: Bytes,
    code_hash: H256,
}

/// In-memory accounts with real balances and code
#[derive(Clone, Debug, Default)]
pub struct StaticAccounts {
    accounts: HashMap<Address, Account>,
}

impl StaticAccounts {
    /// No accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an account
    pub fn insert(&mut self, address: Address, balance: U256, code: impl Into<Bytes>) {
        let code = code.into();
        let code_hash = if code.is_empty() {
            EMPTY_CODE_HASH
        } else {
            keccak256(&code)
        };
        self.accounts.insert(
            address,
            Account {
                balance,
                code,
                code_hash,
            },
        );
    }

    /// Builder form of [`StaticAccounts::insert`]
    pub fn with_account(mut self, address: Address, balance: U256, code: impl Into<Bytes>) -> Self {
        self.insert(address, balance, code);
        self
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether there are no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountProvider for StaticAccounts {
    fn account_exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    fn balance(&self, address: &Address) -> U256 {
        self.accounts
            .get(address)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    fn code(&self, address: &Address) -> &[u8] {
        self.accounts
            .get(address)
            .map(|a| a.code.as_ref())
            .unwrap_or(&[])
    }

    fn code_hash(&self, address: &Address) -> H256 {
        // non-existent accounts hash to zero
        self.accounts
            .get(address)
            .map(|a| a.code_hash)
            .unwrap_or(H256::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_hash() {
        assert_eq!(keccak256(&[]), EMPTY_CODE_HASH);
    }

    #[test]
    fn test_no_code() {
        let addr = Address::from_bytes([1; 20]);
        assert!(NoCode.account_exists(&addr));
        assert_eq!(NoCode.balance(&addr), U256::zero());
        assert_eq!(NoCode.code_size(&addr), 0);
        assert_eq!(NoCode.code_hash(&addr), H256::ZERO);
        let mut buf = [0u8; 4];
        assert_eq!(NoCode.copy_code(&addr, 0, &mut buf), 0);
    }

    #[test]
    fn test_static_accounts() {
        let addr = Address::from_bytes([1; 20]);
        let code = vec![0x60, 0x00, 0x60, 0x00, 0xf3];
        let accounts = StaticAccounts::new().with_account(addr, U256::from(500), code.clone());

        assert!(accounts.account_exists(&addr));
        assert!(!accounts.account_exists(&Address::ZERO));
        assert_eq!(accounts.balance(&addr), U256::from(500));
        assert_eq!(accounts.balance(&Address::ZERO), U256::zero());
        assert_eq!(accounts.code_size(&addr), 5);
        assert_eq!(accounts.code_hash(&addr), keccak256(&code));
        assert_eq!(accounts.code_hash(&Address::ZERO), H256::ZERO);
    }

    #[test]
    fn test_account_without_code() {
        let addr = Address::from_bytes([2; 20]);
        let accounts = StaticAccounts::new().with_account(addr, U256::one(), Vec::new());
        assert_eq!(accounts.code_hash(&addr), EMPTY_CODE_HASH);
    }

    #[test]
    fn test_copy_code_window() {
        let addr = Address::from_bytes([1; 20]);
        let accounts = StaticAccounts::new().with_account(addr, U256::zero(), vec![1, 2, 3, 4, 5]);

        let mut buf = [0u8; 3];
        assert_eq!(accounts.copy_code(&addr, 1, &mut buf), 3);
        assert_eq!(buf, [2, 3, 4]);

        let mut buf = [0u8; 8];
        assert_eq!(accounts.copy_code(&addr, 3, &mut buf), 2);
        assert_eq!(&buf[..2], &[4, 5]);

        assert_eq!(accounts.copy_code(&addr, 5, &mut buf), 0);
        assert_eq!(accounts.copy_code(&addr, 100, &mut buf), 0);
    }
}
