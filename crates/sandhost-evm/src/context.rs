//! Execution context for one top-level transaction

use sandhost_primitives::{Address, H256, U256};
use sandhost_storage::{ChangeSet, StorageOverlay};

/// Transaction and block environment reported to the interpreter.
///
/// The sandbox only knows the origin; everything else stays zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxContext {
    /// Transaction origin (original sender)
    pub origin: Address,
    /// Gas price
    pub gas_price: U256,
    /// Block coinbase
    pub coinbase: Address,
    /// Block number
    pub block_number: u64,
    /// Block timestamp
    pub block_timestamp: u64,
    /// Block gas limit
    pub block_gas_limit: u64,
    /// Block prevrandao
    pub prevrandao: H256,
    /// Chain ID
    pub chain_id: U256,
    /// Base fee
    pub base_fee: U256,
}

impl TxContext {
    /// Context with only the origin set
    pub fn new(origin: Address) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }
}

/// Where a context is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextState {
    /// Executing normally
    Active,
    /// Selfdestruct was invoked
    Destructed,
}

/// What a finished context hands back to the embedder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextOutcome {
    /// Every value observed or written
    pub existing_values: ChangeSet,
    /// Writes made during execution
    pub changes: ChangeSet,
    /// Whether selfdestruct was invoked
    pub destructed: bool,
    /// Beneficiary of the first selfdestruct
    pub beneficiary: Option<Address>,
}

/// Per-transaction state the host callbacks work on.
///
/// Created when execution starts and consumed by [`ExecutionContext::finish`].
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    origin: Address,
    storage: StorageOverlay,
    beneficiary: Option<Address>,
}

impl ExecutionContext {
    /// Context with empty change sets
    pub fn new(origin: Address) -> Self {
        Self::with_storage(origin, StorageOverlay::new())
    }

    /// Context over previously built change sets
    pub fn with_storage(origin: Address, storage: StorageOverlay) -> Self {
        Self {
            origin,
            storage,
            beneficiary: None,
        }
    }

    /// Transaction origin
    pub fn origin(&self) -> Address {
        self.origin
    }

    /// Storage view
    pub fn storage(&self) -> &StorageOverlay {
        &self.storage
    }

    /// Storage view, mutably
    pub fn storage_mut(&mut self) -> &mut StorageOverlay {
        &mut self.storage
    }

    /// Current lifecycle state
    pub fn state(&self) -> ContextState {
        if self.beneficiary.is_some() {
            ContextState::Destructed
        } else {
            ContextState::Active
        }
    }

    /// Whether selfdestruct was invoked
    pub fn is_destructed(&self) -> bool {
        self.state() == ContextState::Destructed
    }

    /// Record a selfdestruct. Returns true the first time.
    pub fn mark_destructed(&mut self, beneficiary: Address) -> bool {
        if self.beneficiary.is_some() {
            return false;
        }
        self.beneficiary = Some(beneficiary);
        true
    }

    /// End the context and hand back its change sets
    pub fn finish(self) -> ContextOutcome {
        let destructed = self.is_destructed();
        let (existing_values, changes) = self.storage.into_parts();
        ContextOutcome {
            existing_values,
            changes,
            destructed,
            beneficiary: self.beneficiary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandhost_storage::StorageStatusMode;

    #[test]
    fn test_tx_context_new() {
        let origin = Address::from_bytes([0x11; 20]);
        let ctx = TxContext::new(origin);
        assert_eq!(ctx.origin, origin);
        assert_eq!(ctx.gas_price, U256::zero());
        assert_eq!(ctx.coinbase, Address::ZERO);
        assert_eq!(ctx.block_number, 0);
        assert_eq!(ctx.chain_id, U256::zero());
    }

    #[test]
    fn test_lifecycle() {
        let mut ctx = ExecutionContext::new(Address::ZERO);
        assert_eq!(ctx.state(), ContextState::Active);

        let beneficiary = Address::from_bytes([0x22; 20]);
        assert!(ctx.mark_destructed(beneficiary));
        assert!(!ctx.mark_destructed(Address::ZERO));
        assert_eq!(ctx.state(), ContextState::Destructed);

        let outcome = ctx.finish();
        assert!(outcome.destructed);
        assert_eq!(outcome.beneficiary, Some(beneficiary));
    }

    #[test]
    fn test_finish_returns_change_sets() {
        let mut ctx = ExecutionContext::new(Address::ZERO);
        let key = H256::from_bytes([1; 32]);
        let value = H256::from_bytes([2; 32]);
        ctx.storage_mut().seed(H256::from_bytes([3; 32]), value);
        ctx.storage_mut()
            .store(key, value, StorageStatusMode::Classified);

        let outcome = ctx.finish();
        assert!(!outcome.destructed);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.existing_values.len(), 2);
        assert_eq!(outcome.changes.lookup(&key), Some(value));
    }
}
