//! Host configuration

use crate::error::{HostError, HostResult};
use sandhost_codec::{
    GasAccounting, CALL_MESSAGE_FIXED_LEN, CALL_RESULT_FIXED_LEN, DEFAULT_CALL_BUFFER_CAPACITY,
    DEFAULT_LOG_BUFFER_CAPACITY, LOG_FIXED_LEN,
};
use sandhost_storage::StorageStatusMode;
use sandhost_syscall::SyscallTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted buffer capacity (16 MiB)
///
/// The call result buffer is allocated in full before every nested call.
pub const MAX_BUFFER_CAPACITY: usize = 16 * 1024 * 1024;

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Size of the call message and call result buffers
    #[serde(default = "default_call_buffer_capacity")]
    pub call_buffer_capacity: usize,
    /// Size of the log record buffer
    #[serde(default = "default_log_buffer_capacity")]
    pub log_buffer_capacity: usize,
    /// Where a call's remaining gas comes from
    #[serde(default)]
    pub gas_accounting: GasAccounting,
    /// How storage writes are reported
    #[serde(default)]
    pub storage_status: StorageStatusMode,
    /// Reject storage writes after selfdestruct instead of warning
    #[serde(default)]
    pub strict_destruct: bool,
    /// Syscall numbers
    #[serde(default)]
    pub syscalls: SyscallTable,
}

fn default_call_buffer_capacity() -> usize {
    DEFAULT_CALL_BUFFER_CAPACITY
}

fn default_log_buffer_capacity() -> usize {
    DEFAULT_LOG_BUFFER_CAPACITY
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            call_buffer_capacity: default_call_buffer_capacity(),
            log_buffer_capacity: default_log_buffer_capacity(),
            gas_accounting: GasAccounting::default(),
            storage_status: StorageStatusMode::default(),
            strict_destruct: false,
            syscalls: SyscallTable::default(),
        }
    }
}

impl HostConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> HostResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| HostError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded host config");
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> HostResult<String> {
        toml::to_string_pretty(self).map_err(|e| HostError::Config(e.to_string()))
    }

    /// Check that every buffer can hold an empty message, that no buffer
    /// exceeds [`MAX_BUFFER_CAPACITY`], and that no two syscalls share a number
    pub fn validate(&self) -> HostResult<()> {
        for (name, capacity) in [
            ("call_buffer_capacity", self.call_buffer_capacity),
            ("log_buffer_capacity", self.log_buffer_capacity),
        ] {
            if capacity > MAX_BUFFER_CAPACITY {
                return Err(HostError::Config(format!(
                    "{} {} exceeds the maximum of {}",
                    name, capacity, MAX_BUFFER_CAPACITY
                )));
            }
        }
        let call_min = CALL_MESSAGE_FIXED_LEN.max(CALL_RESULT_FIXED_LEN);
        if self.call_buffer_capacity < call_min {
            return Err(HostError::Config(format!(
                "call_buffer_capacity {} is below the minimum of {}",
                self.call_buffer_capacity, call_min
            )));
        }
        if self.log_buffer_capacity < LOG_FIXED_LEN {
            return Err(HostError::Config(format!(
                "log_buffer_capacity {} is below the minimum of {}",
                self.log_buffer_capacity, LOG_FIXED_LEN
            )));
        }
        if let Some(number) = self.syscalls.duplicate() {
            return Err(HostError::Config(format!(
                "syscall number {} is assigned more than once",
                number
            )));
        }
        Ok(())
    }
}
