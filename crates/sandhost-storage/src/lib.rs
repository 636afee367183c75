//! # sandhost-storage
//!
//! In-memory storage view for a single execution.
//!
//! There is no live storage backend inside the sandbox. Instead the embedder
//! seeds the values it already knows into `existing_values`, and every write
//! made during execution is recorded twice: once in `changes` (the write set
//! handed back when the execution ends) and once in `existing_values` (so the
//! snapshot never falls behind the writes).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod change_set;
mod overlay;
mod status;

pub use change_set::ChangeSet;
pub use overlay::StorageOverlay;
pub use status::{StorageStatus, StorageStatusMode};
