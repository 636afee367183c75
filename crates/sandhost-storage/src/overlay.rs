//! Two-tier storage view: the write set over the observed snapshot

use crate::change_set::ChangeSet;
use crate::status::{StorageStatus, StorageStatusMode};
use sandhost_primitives::{StorageKey, StorageValue};

/// Storage view for one execution.
///
/// Reads check `changes` first, then fall back to `existing_values`.
/// Writes go to both sets, so every key in `changes` is also in
/// `existing_values`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageOverlay {
    existing_values: ChangeSet,
    changes: ChangeSet,
}

impl StorageOverlay {
    /// Create an overlay with nothing observed and nothing written
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an overlay from previously built sets.
    ///
    /// Keys already present in `changes` but missing from `existing_values`
    /// are copied over so the overlay starts consistent.
    pub fn from_parts(mut existing_values: ChangeSet, changes: ChangeSet) -> Self {
        for (key, value) in &changes {
            if !existing_values.contains(key) {
                existing_values.insert(*key, *value);
            }
        }
        Self {
            existing_values,
            changes,
        }
    }

    /// Record a value observed outside this execution
    pub fn seed(&mut self, key: StorageKey, value: StorageValue) {
        self.existing_values.insert(key, value);
    }

    /// Read a slot: own writes first, then the observed snapshot
    pub fn load(&self, key: &StorageKey) -> Option<StorageValue> {
        let value = self
            .changes
            .lookup(key)
            .or_else(|| self.existing_values.lookup(key));
        tracing::trace!(key = %key, found = value.is_some(), "storage load");
        value
    }

    /// Write a slot into both sets and report the outcome under `mode`
    pub fn store(
        &mut self,
        key: StorageKey,
        value: StorageValue,
        mode: StorageStatusMode,
    ) -> StorageStatus {
        let prior = self.existing_values.insert(key, value);
        self.changes.insert(key, value);
        let status = mode.report(prior, value);
        tracing::trace!(key = %key, ?status, "storage store");
        status
    }

    /// Values observed or written so far
    pub fn existing_values(&self) -> &ChangeSet {
        &self.existing_values
    }

    /// Writes made during this execution
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Split back into `(existing_values, changes)`
    pub fn into_parts(self) -> (ChangeSet, ChangeSet) {
        (self.existing_values, self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandhost_primitives::H256;

    fn word(b: u8) -> H256 {
        H256::from_bytes([b; 32])
    }

    #[test]
    fn test_load_falls_back_to_existing() {
        let mut overlay = StorageOverlay::new();
        overlay.seed(word(1), word(10));
        assert_eq!(overlay.load(&word(1)), Some(word(10)));
        assert!(overlay.changes().is_empty());
    }

    #[test]
    fn test_load_prefers_changes() {
        let existing: ChangeSet = vec![(word(1), word(10))].into_iter().collect();
        let changes: ChangeSet = vec![(word(1), word(11))].into_iter().collect();
        let overlay = StorageOverlay::from_parts(existing, changes);
        assert_eq!(overlay.load(&word(1)), Some(word(11)));
    }

    #[test]
    fn test_load_missing() {
        let overlay = StorageOverlay::new();
        assert_eq!(overlay.load(&word(9)), None);
    }

    #[test]
    fn test_store_writes_both_sets() {
        let mut overlay = StorageOverlay::new();
        overlay.store(word(1), word(2), StorageStatusMode::Classified);
        assert_eq!(overlay.changes().lookup(&word(1)), Some(word(2)));
        assert_eq!(overlay.existing_values().lookup(&word(1)), Some(word(2)));
    }

    #[test]
    fn test_store_reports_status() {
        let mut overlay = StorageOverlay::new();
        let mode = StorageStatusMode::Classified;
        assert_eq!(overlay.store(word(1), word(2), mode), StorageStatus::Added);
        assert_eq!(overlay.store(word(1), word(3), mode), StorageStatus::Modified);
        assert_eq!(overlay.store(word(1), word(3), mode), StorageStatus::Unchanged);
        assert_eq!(overlay.store(word(1), H256::ZERO, mode), StorageStatus::Deleted);
    }

    #[test]
    fn test_store_against_seeded_value() {
        let mut overlay = StorageOverlay::new();
        overlay.seed(word(1), word(5));
        assert_eq!(
            overlay.store(word(1), word(5), StorageStatusMode::Classified),
            StorageStatus::Unchanged
        );
        // Unchanged writes are still recorded in the write set
        assert_eq!(overlay.changes().lookup(&word(1)), Some(word(5)));
    }

    #[test]
    fn test_from_parts_restores_invariant() {
        let changes: ChangeSet = vec![(word(1), word(2))].into_iter().collect();
        let overlay = StorageOverlay::from_parts(ChangeSet::new(), changes);
        assert_eq!(overlay.existing_values().lookup(&word(1)), Some(word(2)));
    }

    #[test]
    fn test_into_parts() {
        let mut overlay = StorageOverlay::new();
        overlay.seed(word(7), word(70));
        overlay.store(word(1), word(2), StorageStatusMode::AlwaysAdded);
        let (existing, changes) = overlay.into_parts();
        assert_eq!(existing.len(), 2);
        assert_eq!(changes.len(), 1);
    }
}
