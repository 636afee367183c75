//! Host callbacks served from the execution context and the syscall bridge

use crate::accounts::{AccountProvider, NoCode};
use crate::config::HostConfig;
use crate::context::{ContextOutcome, ExecutionContext, TxContext};
use crate::error::{HostError, HostResult};
use sandhost_codec::{decode_result, encode_call, encode_log, CallMessage, CallResult};
use sandhost_primitives::{Address, StorageKey, StorageValue, H256, U256};
use sandhost_storage::StorageStatus;
use sandhost_syscall::{Boundary, SyscallBridge};

/// Callbacks an EVM interpreter needs from its environment
pub trait Host {
    /// Transaction and block environment
    fn tx_context(&self) -> TxContext;

    /// Whether an account exists
    fn account_exists(&self, address: &Address) -> bool;

    /// Read a storage slot; unknown slots read as zero
    fn get_storage(&self, address: &Address, key: &StorageKey) -> StorageValue;

    /// Write a storage slot
    fn set_storage(
        &mut self,
        address: &Address,
        key: StorageKey,
        value: StorageValue,
    ) -> HostResult<StorageStatus>;

    /// Account balance
    fn balance(&self, address: &Address) -> U256;

    /// Code size in bytes
    fn code_size(&self, address: &Address) -> usize;

    /// Code hash
    fn code_hash(&self, address: &Address) -> H256;

    /// Copy code into `buffer`; returns the bytes copied
    fn copy_code(&self, address: &Address, offset: usize, buffer: &mut [u8]) -> usize;

    /// Destroy `address`, sending its balance to `beneficiary`.
    /// Returns true the first time.
    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) -> HostResult<bool>;

    /// Run a nested call
    fn call(&mut self, message: &CallMessage) -> HostResult<CallResult>;

    /// Emit a log record
    fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[H256]) -> HostResult<()>;

    /// Run a nested call, turning any error into a failed result with no gas left
    fn call_or_failure(&mut self, message: &CallMessage) -> CallResult {
        match self.call(message) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "nested call failed");
                CallResult::failure(0)
            }
        }
    }
}

/// [`Host`] for an interpreter running inside the sandbox.
///
/// Storage is served from the [`ExecutionContext`]; calls, logs and
/// selfdestruct go out through the [`SyscallBridge`]. There is one storage
/// overlay per execution, so the account address is not part of the slot key.
#[derive(Debug)]
pub struct SandboxHost<B, A = NoCode> {
    bridge: SyscallBridge<B>,
    context: ExecutionContext,
    accounts: A,
    config: HostConfig,
}

impl<B: Boundary> SandboxHost<B, NoCode> {
    /// Host that answers account queries with [`NoCode`]
    pub fn new(boundary: B, context: ExecutionContext, config: HostConfig) -> Self {
        Self::with_accounts(boundary, context, NoCode, config)
    }
}

impl<B: Boundary, A: AccountProvider> SandboxHost<B, A> {
    /// Host with a custom account provider
    pub fn with_accounts(
        boundary: B,
        context: ExecutionContext,
        accounts: A,
        config: HostConfig,
    ) -> Self {
        let bridge = SyscallBridge::new(boundary, config.syscalls);
        Self {
            bridge,
            context,
            accounts,
            config,
        }
    }

    /// Execution context
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Execution context, mutably
    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    /// Configuration in use
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Syscall bridge
    pub fn bridge(&self) -> &SyscallBridge<B> {
        &self.bridge
    }

    /// Account provider
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// End execution.
    ///
    /// On success the output is handed to the sandbox with the `return`
    /// syscall; on failure nothing is sent. Either way the context ends and
    /// its change sets are returned.
    pub fn finish(mut self, success: bool, output: &[u8]) -> HostResult<ContextOutcome> {
        if success {
            self.bridge.emit_return(output)?;
        }
        let outcome = self.context.finish();
        tracing::info!(
            success,
            changes = outcome.changes.len(),
            destructed = outcome.destructed,
            "execution finished"
        );
        Ok(outcome)
    }
}

impl<B: Boundary, A: AccountProvider> Host for SandboxHost<B, A> {
    fn tx_context(&self) -> TxContext {
        TxContext::new(self.context.origin())
    }

    fn account_exists(&self, address: &Address) -> bool {
        self.accounts.account_exists(address)
    }

    fn get_storage(&self, _address: &Address, key: &StorageKey) -> StorageValue {
        self.context.storage().load(key).unwrap_or_default()
    }

    fn set_storage(
        &mut self,
        _address: &Address,
        key: StorageKey,
        value: StorageValue,
    ) -> HostResult<StorageStatus> {
        if self.context.is_destructed() {
            if self.config.strict_destruct {
                return Err(HostError::WriteAfterDestruct(key));
            }
            tracing::warn!(key = %key, "storage write after selfdestruct");
        }
        let mode = self.config.storage_status;
        Ok(self.context.storage_mut().store(key, value, mode))
    }

    fn balance(&self, address: &Address) -> U256 {
        self.accounts.balance(address)
    }

    fn code_size(&self, address: &Address) -> usize {
        self.accounts.code_size(address)
    }

    fn code_hash(&self, address: &Address) -> H256 {
        self.accounts.code_hash(address)
    }

    fn copy_code(&self, address: &Address, offset: usize, buffer: &mut [u8]) -> usize {
        self.accounts.copy_code(address, offset, buffer)
    }

    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) -> HostResult<bool> {
        // the context is destructed even if the notification fails
        let first = self.context.mark_destructed(*beneficiary);
        tracing::debug!(address = %address, beneficiary = %beneficiary, first, "selfdestruct");
        self.bridge.notify_selfdestruct(beneficiary)?;
        Ok(first)
    }

    fn call(&mut self, message: &CallMessage) -> HostResult<CallResult> {
        let capacity = self.config.call_buffer_capacity;
        let encoded = encode_call(message, capacity)?;
        let mut result = vec![0u8; capacity];
        self.bridge.perform_call(&encoded, &mut result)?;
        let decoded = decode_result(&result, message.gas, self.config.gas_accounting)?;
        tracing::debug!(
            kind = %message.kind,
            destination = %message.destination,
            output_len = decoded.output.len(),
            "call returned"
        );
        Ok(decoded)
    }

    fn emit_log(&mut self, _address: &Address, data: &[u8], topics: &[H256]) -> HostResult<()> {
        let record = encode_log(data, topics, self.config.log_buffer_capacity)?;
        self.bridge.emit_log(&record)?;
        Ok(())
    }
}
