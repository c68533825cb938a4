//! Snapshot diff output types.
//!
//! Every list is emitted sorted by key so serialized output is stable
//! regardless of the input collections' iteration order.

use crate::model::{ContentRouter, ContentServer, Record};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Verdict of comparing two values: equal, or different with a payload
/// describing how.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison<T> {
    Equal,
    Different(T),
}

impl<T> Comparison<T> {
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }

    /// The difference payload, if any
    pub fn into_difference(self) -> Option<T> {
        match self {
            Comparison::Equal => None,
            Comparison::Different(d) => Some(d),
        }
    }
}

/// One differing field of a changed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDelta {
    /// Field name as it appears in the snapshot document
    pub field: String,
    /// Value in the current snapshot (`null` when unset or not applicable)
    pub before: Value,
    /// Value in the pending snapshot (`null` when unset or not applicable)
    pub after: Value,
    /// Structured breakdown for collection-valued fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DeltaDetail>,
}

/// Breakdown attached to a [`FieldDelta`] of a collection-valued field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeltaDetail {
    /// Unordered string set (e.g. `capabilities`)
    Set(SetDelta),
    /// Delivery-service assignment map
    Assignments(AssignmentDiff),
}

/// Membership delta between two unordered string sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SetDelta {
    /// Members only in the pending set
    pub added: Vec<String>,
    /// Members only in the current set
    pub removed: Vec<String>,
    /// Members in both
    pub unchanged: Vec<String>,
}

/// Differences between two delivery-service assignment maps.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AssignmentDiff {
    /// XMLIDs assigned only in pending
    pub added: Vec<String>,
    /// XMLIDs assigned only in current
    pub removed: Vec<String>,
    /// XMLIDs assigned in both with a different remap list
    pub changed: Vec<AssignmentChange>,
    /// XMLIDs assigned in both with an identical remap list
    pub unchanged: Vec<String>,
}

impl AssignmentDiff {
    /// True when nothing was added, removed or changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// A delivery service whose remap list differs between the two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentChange {
    pub xml_id: String,
    pub before: Vec<String>,
    pub after: Vec<String>,
    /// Positions whose entry differs, over the longer of the two lists
    pub positions: Vec<PositionDelta>,
}

/// A single position of an ordered list that differs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDelta {
    pub index: usize,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// A keyed record that is new, deleted or unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<R> {
    pub key: String,
    pub record: Record<R>,
}

/// A keyed record present on both sides with at least one differing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedEntry<R> {
    pub key: String,
    pub before: Record<R>,
    pub after: Record<R>,
    /// Non-empty; ordered by the record schema
    pub deltas: Vec<FieldDelta>,
}

/// Categorized differences between two collections of one record type.
///
/// The four categories partition the union of both key sets; `changes`
/// counts `new`, `deleted` and `changed` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceResult<R> {
    pub new: Vec<Entry<R>>,
    pub deleted: Vec<Entry<R>>,
    pub unchanged: Vec<Entry<R>>,
    pub changed: Vec<ChangedEntry<R>>,
    pub changes: usize,
}

impl<R> DifferenceResult<R> {
    /// True when deploying would change nothing for this record type
    pub fn is_unchanged(&self) -> bool {
        self.changes == 0
    }

    /// Every key in the result, category by category
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.new
            .iter()
            .map(|e| e.key.as_str())
            .chain(self.deleted.iter().map(|e| e.key.as_str()))
            .chain(self.unchanged.iter().map(|e| e.key.as_str()))
            .chain(self.changed.iter().map(|e| e.key.as_str()))
    }
}

/// Differences between a current and a pending snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotDifferences {
    pub content_routers: DifferenceResult<ContentRouter>,
    pub content_servers: DifferenceResult<ContentServer>,
    /// Sum of both `changes` counts; zero means there is nothing to deploy
    pub pending_changes: usize,
}

/// Field-by-field comparison of two flat JSON objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecordDiff {
    /// Every field present on either side
    pub fields: BTreeMap<String, FieldChange>,
    /// Number of fields whose values differ
    pub num: usize,
}

/// Old and new value of one field; `None` means the field was absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub old: Option<Value>,
    pub new: Option<Value>,
}

impl FieldChange {
    pub fn is_change(&self) -> bool {
        self.old != self.new
    }
}
