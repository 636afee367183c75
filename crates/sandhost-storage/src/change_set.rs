//! Ordered key/value change set

use sandhost_primitives::{StorageKey, StorageValue};
use std::collections::btree_map::{self, BTreeMap};

/// Storage slots keyed by their 32-byte key.
///
/// Keys are unique and iteration follows key order. Absence is reported as
/// `None`; a zero value is an ordinary stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: BTreeMap<StorageKey, StorageValue>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value stored for `key`
    pub fn lookup(&self, key: &StorageKey) -> Option<StorageValue> {
        self.entries.get(key).copied()
    }

    /// Store `value` under `key`, returning the value it replaced
    pub fn insert(&mut self, key: StorageKey, value: StorageValue) -> Option<StorageValue> {
        self.entries.insert(key, value)
    }

    /// Whether `key` has an entry
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, StorageKey, StorageValue> {
        self.entries.iter()
    }
}

impl FromIterator<(StorageKey, StorageValue)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (StorageKey, StorageValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(StorageKey, StorageValue)> for ChangeSet {
    fn extend<I: IntoIterator<Item = (StorageKey, StorageValue)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for ChangeSet {
    type Item = (StorageKey, StorageValue);
    type IntoIter = btree_map::IntoIter<StorageKey, StorageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a StorageKey, &'a StorageValue);
    type IntoIter = btree_map::Iter<'a, StorageKey, StorageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
