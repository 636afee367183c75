//! Storage write outcome reported back to the interpreter

use sandhost_primitives::StorageValue;
use serde::{Deserialize, Serialize};

/// Effect of a storage write on the slot's previously observed value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageStatus {
    /// The slot already held the written value
    Unchanged,
    /// A zero (or never seen) slot became non-zero
    Added,
    /// A non-zero slot changed to another non-zero value
    Modified,
    /// A non-zero slot was cleared to zero
    Deleted,
}

impl StorageStatus {
    /// Classify a write given the prior value from `existing_values`.
    ///
    /// A slot that was never observed reads as zero.
    pub fn classify(prior: Option<StorageValue>, new: StorageValue) -> Self {
        let prior = prior.unwrap_or_default();
        if prior == new {
            StorageStatus::Unchanged
        } else if prior.is_zero() {
            StorageStatus::Added
        } else if new.is_zero() {
            StorageStatus::Deleted
        } else {
            StorageStatus::Modified
        }
    }
}

/// How storage writes are reported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageStatusMode {
    /// Compare against the prior value and report the real outcome
    #[default]
    Classified,
    /// Report every write as `Added`, whatever it did
    AlwaysAdded,
}

impl StorageStatusMode {
    /// Status to report for a write under this mode
    pub fn report(self, prior: Option<StorageValue>, new: StorageValue) -> StorageStatus {
        match self {
            StorageStatusMode::Classified => StorageStatus::classify(prior, new),
            StorageStatusMode::AlwaysAdded => StorageStatus::Added,
        }
    }
}
