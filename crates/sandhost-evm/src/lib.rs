//! # sandhost-evm
//!
//! EVM host callbacks for an interpreter running inside the syscall sandbox.
//!
//! [`SandboxHost`] implements the [`Host`] trait:
//! - storage reads and writes go to the change sets in the [`ExecutionContext`]
//! - nested calls, logs and selfdestruct are encoded and sent through the
//!   syscall bridge
//! - account, balance and code queries are answered by an [`AccountProvider`]
//!
//! When execution ends, [`SandboxHost::finish`] sends the output with the
//! `return` syscall (on success only) and hands the change sets back.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod accounts;
mod config;
mod context;
mod error;
mod host;

pub use accounts::{keccak256, AccountProvider, NoCode, StaticAccounts, EMPTY_CODE_HASH};
pub use config::{HostConfig, MAX_BUFFER_CAPACITY};
pub use context::{ContextOutcome, ContextState, ExecutionContext, TxContext};
pub use error::{FailureKind, HostError, HostResult};
pub use host::{Host, SandboxHost};
