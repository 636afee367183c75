//! # sandhost-syscall
//!
//! The four syscalls the sandbox exposes to the interpreter:
//! - `return`: hand the final output back, once, on success
//! - `log`: one encoded log record per call
//! - `selfdestruct`: the 20-byte beneficiary address
//! - `call`: a nested call; blocks until the result buffer is filled
//!
//! Syscall numbers come from a [`SyscallTable`] so the bridge does not depend
//! on one protocol revision. The raw crossing sits behind the [`Boundary`]
//! trait; [`SyscallBridge`] adds status checking and logging on top.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod boundary;
mod bridge;
mod error;
mod recording;
mod table;

#[cfg(target_arch = "riscv64")]
pub use boundary::EcallBoundary;
pub use boundary::Boundary;
pub use bridge::SyscallBridge;
pub use error::{BoundaryError, BoundaryResult};
pub use recording::{RecordingBoundary, Responder};
pub use table::{Syscall, SyscallTable};
