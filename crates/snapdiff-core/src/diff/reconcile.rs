//! Key reconciliation between two keyed collections.

use std::collections::HashSet;

/// Partition of the union of two key sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPartition<'a> {
    /// Keys only in the current collection
    pub only_current: Vec<&'a str>,
    /// Keys only in the pending collection
    pub only_pending: Vec<&'a str>,
    /// Keys in both collections
    pub both: Vec<&'a str>,
}

impl KeyPartition<'_> {
    /// Sort every part lexicographically.
    pub fn sorted(mut self) -> Self {
        self.only_current.sort_unstable();
        self.only_pending.sort_unstable();
        self.both.sort_unstable();
        self
    }
}

/// Partition `current ∪ pending` into only-current, only-pending and both.
///
/// Runs in O(n + m) using hash-set membership only. Part order follows the
/// sets' iteration order; call [`KeyPartition::sorted`] for stable output.
pub fn reconcile<'a>(current: &HashSet<&'a str>, pending: &HashSet<&'a str>) -> KeyPartition<'a> {
    let mut partition = KeyPartition::default();
    for &key in current {
        if pending.contains(key) {
            partition.both.push(key);
        } else {
            partition.only_current.push(key);
        }
    }
    partition.only_pending = pending
        .iter()
        .filter(|key| !current.contains(*key))
        .copied()
        .collect();
    partition
}

/// Collect the keys of any keyed collection into a borrowed key set.
pub fn key_set<'a, I>(keys: I) -> HashSet<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    keys.into_iter().map(String::as_str).collect()
}
