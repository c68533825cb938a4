//! Delivery-service assignment differencing.
//!
//! Remap order within one delivery service is rule precedence, so remap lists
//! are compared position by position, unlike `capabilities`, which is an
//! unordered set.

use crate::diff::model::{AssignmentChange, AssignmentDiff, Comparison, PositionDelta};
use crate::diff::reconcile::{key_set, reconcile};
use crate::model::AssignmentMap;

static NO_ASSIGNMENTS: AssignmentMap = AssignmentMap::new();

/// Compare the assignment maps of the same server in two snapshots.
///
/// `None` on one side means the server has no assignments there and is
/// compared as an empty map. `None` on both sides is trivially equal.
pub fn diff_assignments(
    before: Option<&AssignmentMap>,
    after: Option<&AssignmentMap>,
) -> Comparison<AssignmentDiff> {
    if before.is_none() && after.is_none() {
        return Comparison::Equal;
    }
    let before = before.unwrap_or(&NO_ASSIGNMENTS);
    let after = after.unwrap_or(&NO_ASSIGNMENTS);

    let partition = reconcile(&key_set(before.keys()), &key_set(after.keys())).sorted();

    let mut diff = AssignmentDiff {
        added: partition.only_pending.iter().map(|k| k.to_string()).collect(),
        removed: partition.only_current.iter().map(|k| k.to_string()).collect(),
        ..Default::default()
    };

    for xml_id in partition.both {
        let (old, new) = (&before[xml_id], &after[xml_id]);
        if old == new {
            diff.unchanged.push(xml_id.to_string());
        } else {
            diff.changed.push(AssignmentChange {
                xml_id: xml_id.to_string(),
                before: old.clone(),
                after: new.clone(),
                positions: ordered_delta(old, new),
            });
        }
    }

    if diff.is_empty() {
        Comparison::Equal
    } else {
        Comparison::Different(diff)
    }
}

/// Positions at which two ordered lists differ, over the longer of the two.
pub fn ordered_delta(old: &[String], new: &[String]) -> Vec<PositionDelta> {
    (0..old.len().max(new.len()))
        .filter_map(|index| {
            let (o, n) = (old.get(index), new.get(index));
            (o != n).then(|| PositionDelta {
                index,
                old: o.cloned(),
                new: n.cloned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[&str])]) -> AssignmentMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_both_absent_is_equal() {
        assert!(diff_assignments(None, None).is_equal());
    }

    #[test]
    fn test_identical_maps_are_equal() {
        let m = map(&[("ds1", &["/a", "/b"]), ("ds2", &["/c", "/d"])]);
        assert!(diff_assignments(Some(&m), Some(&m.clone())).is_equal());
    }

    #[test]
    fn test_order_change_is_a_change() {
        let before = map(&[("ds1", &["/a", "/b"])]);
        let after = map(&[("ds1", &["/b", "/a"])]);
        let diff = diff_assignments(Some(&before), Some(&after))
            .into_difference()
            .expect("reordering must be reported");
        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].xml_id, "ds1");
        assert_eq!(diff.changed[0].before, vec!["/a", "/b"]);
        assert_eq!(diff.changed[0].after, vec!["/b", "/a"]);
        assert_eq!(diff.changed[0].positions.len(), 2);
    }

    #[test]
    fn test_added_and_removed_keys() {
        let before = map(&[("ds1", &["/x"]), ("gone", &["/g"])]);
        let after = map(&[("ds1", &["/x"]), ("ds2", &["/y"])]);
        let diff = diff_assignments(Some(&before), Some(&after))
            .into_difference()
            .unwrap();
        assert_eq!(diff.added, vec!["ds2"]);
        assert_eq!(diff.removed, vec!["gone"]);
        assert_eq!(diff.unchanged, vec!["ds1"]);
        assert!(diff.changed.is_empty());
    }

    #[test]
    fn test_one_side_absent_compares_as_empty() {
        let after = map(&[("ds1", &["/x"])]);
        let diff = diff_assignments(None, Some(&after)).into_difference().unwrap();
        assert_eq!(diff.added, vec!["ds1"]);

        let empty = AssignmentMap::new();
        assert!(diff_assignments(None, Some(&empty)).is_equal());
    }

    #[test]
    fn test_ordered_delta_tracks_length_difference() {
        let old: Vec<String> = vec!["/a".into()];
        let new: Vec<String> = vec!["/a".into(), "/b".into()];
        let positions = ordered_delta(&old, &new);
        assert_eq!(
            positions,
            vec![PositionDelta {
                index: 1,
                old: None,
                new: Some("/b".to_string())
            }]
        );
    }
}
