//! Status-checked syscalls

use crate::boundary::Boundary;
use crate::error::{BoundaryError, BoundaryResult};
use crate::table::{Syscall, SyscallTable};
use sandhost_primitives::Address;

/// Issues syscalls through a [`Boundary`] and turns non-zero statuses into
/// errors.
#[derive(Debug)]
pub struct SyscallBridge<B> {
    boundary: B,
    table: SyscallTable,
}

impl<B: Boundary> SyscallBridge<B> {
    /// Bridge over `boundary` using `table` for syscall numbers
    pub fn new(boundary: B, table: SyscallTable) -> Self {
        Self { boundary, table }
    }

    /// Syscall numbers in use
    pub fn table(&self) -> &SyscallTable {
        &self.table
    }

    /// Underlying boundary
    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// Underlying boundary, mutably
    pub fn boundary_mut(&mut self) -> &mut B {
        &mut self.boundary
    }

    /// Give back the boundary
    pub fn into_inner(self) -> B {
        self.boundary
    }

    /// Hand the final output to the sandbox
    pub fn emit_return(&mut self, output: &[u8]) -> BoundaryResult<()> {
        let number = self.table.ret;
        tracing::debug!(number, len = output.len(), "syscall return");
        let code = self.boundary.send(number, output);
        check(Syscall::Return, number, code)
    }

    /// Send one encoded log record
    pub fn emit_log(&mut self, record: &[u8]) -> BoundaryResult<()> {
        let number = self.table.log;
        tracing::debug!(number, len = record.len(), "syscall log");
        let code = self.boundary.send(number, record);
        check(Syscall::Log, number, code)
    }

    /// Report a self-destruct with its beneficiary
    pub fn notify_selfdestruct(&mut self, beneficiary: &Address) -> BoundaryResult<()> {
        let number = self.table.selfdestruct;
        tracing::debug!(number, beneficiary = %beneficiary, "syscall selfdestruct");
        let code = self.boundary.send(number, beneficiary.as_bytes());
        check(Syscall::SelfDestruct, number, code)
    }

    /// Issue a nested call. Blocks until the sandbox has written `result`.
    pub fn perform_call(&mut self, message: &[u8], result: &mut [u8]) -> BoundaryResult<()> {
        let number = self.table.call;
        tracing::debug!(
            number,
            message_len = message.len(),
            result_capacity = result.len(),
            "syscall call"
        );
        let code = self.boundary.exchange(number, result, message);
        check(Syscall::Call, number, code)
    }
}

fn check(syscall: Syscall, number: u64, code: i64) -> BoundaryResult<()> {
    if code == 0 {
        Ok(())
    } else {
        tracing::warn!(%syscall, number, code, "syscall failed");
        Err(BoundaryError::Status {
            syscall,
            number,
            code,
        })
    }
}
