//! Boundary error types

use crate::table::Syscall;
use thiserror::Error;

/// A syscall reported failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    /// Non-zero status from the other side
    #[error("{syscall} syscall (#{number}) failed with status {code}")]
    Status {
        /// Operation that failed
        syscall: Syscall,
        /// Number it was issued under
        number: u64,
        /// Raw status
        code: i64,
    },
}

/// Result type for boundary operations
pub type BoundaryResult<T> = Result<T, BoundaryError>;
