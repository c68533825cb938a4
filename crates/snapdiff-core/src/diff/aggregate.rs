//! Categorizing one keyed collection against another.

use crate::diff::compare::compare_records;
use crate::diff::model::{ChangedEntry, Comparison, DifferenceResult, Entry};
use crate::diff::reconcile::{key_set, reconcile};
use crate::diff::schema::FieldSpec;
use crate::snapshot::Collection;
use serde::Serialize;

/// Diff two keyed collections of the same record type.
///
/// Every key of `current ∪ pending` lands in exactly one of `new`, `deleted`,
/// `unchanged` or `changed`, each sorted by key. The engine never fails:
/// entries that could not be typed are compared as raw JSON.
pub fn diff_collection<R: Clone + Serialize>(
    schema: &[FieldSpec<R>],
    current: &Collection<R>,
    pending: &Collection<R>,
) -> DifferenceResult<R> {
    let partition = reconcile(&key_set(current.keys()), &key_set(pending.keys())).sorted();

    let entry = |key: &str, collection: &Collection<R>| {
        collection.get(key).map(|record| Entry {
            key: key.to_string(),
            record: record.clone(),
        })
    };

    let new: Vec<Entry<R>> = partition
        .only_pending
        .iter()
        .filter_map(|key| entry(*key, pending))
        .collect();
    let deleted: Vec<Entry<R>> = partition
        .only_current
        .iter()
        .filter_map(|key| entry(*key, current))
        .collect();

    let mut unchanged = Vec::new();
    let mut changed = Vec::new();
    for key in partition.both {
        let (Some(before), Some(after)) = (current.get(key), pending.get(key)) else {
            continue;
        };
        match compare_records(schema, before, after) {
            Comparison::Equal => unchanged.push(Entry {
                key: key.to_string(),
                record: after.clone(),
            }),
            Comparison::Different(deltas) => changed.push(ChangedEntry {
                key: key.to_string(),
                before: before.clone(),
                after: after.clone(),
                deltas,
            }),
        }
    }

    let changes = new.len() + deleted.len() + changed.len();
    DifferenceResult {
        new,
        deleted,
        unchanged,
        changed,
        changes,
    }
}
