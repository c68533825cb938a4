//! Field-level comparison of two records of the same type.

use crate::diff::assignments::diff_assignments;
use crate::diff::model::{Comparison, DeltaDetail, FieldDelta, SetDelta};
use crate::diff::record_diff::build_diff;
use crate::diff::schema::{FieldAccess, FieldSpec};
use crate::model::{AssignmentMap, Record};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Field name used for the single delta reported when a malformed entry
/// cannot be compared field by field.
pub const WHOLE_RECORD_FIELD: &str = "record";

/// Compare two typed records field by field under `schema`.
///
/// Deltas come back in schema order. A field whose comparison mode does not
/// apply to either record (e.g. `deliveryServices` on two mid servers) is
/// skipped entirely.
pub fn compare<R>(schema: &[FieldSpec<R>], before: &R, after: &R) -> Comparison<Vec<FieldDelta>> {
    let deltas: Vec<FieldDelta> = schema
        .iter()
        .filter_map(|spec| compare_field(spec, before, after))
        .collect();

    if deltas.is_empty() {
        Comparison::Equal
    } else {
        Comparison::Different(deltas)
    }
}

fn compare_field<R>(spec: &FieldSpec<R>, before: &R, after: &R) -> Option<FieldDelta> {
    match &spec.access {
        FieldAccess::Scalar(get) => {
            let (old, new) = (get(before), get(after));
            (old != new).then(|| FieldDelta {
                field: spec.name.to_string(),
                before: old.to_json(),
                after: new.to_json(),
                detail: None,
            })
        }
        FieldAccess::StringSet(get) => {
            let (old, new) = (get(before), get(after));
            let delta = set_delta(old, new)?;
            Some(FieldDelta {
                field: spec.name.to_string(),
                before: Value::from(old.to_vec()),
                after: Value::from(new.to_vec()),
                detail: Some(DeltaDetail::Set(delta)),
            })
        }
        FieldAccess::AssignmentMap { applies, get } => {
            let old = applies(before).then(|| get(before)).flatten();
            let new = applies(after).then(|| get(after)).flatten();
            if !applies(before) && !applies(after) {
                return None;
            }
            let diff = diff_assignments(old, new).into_difference()?;
            Some(FieldDelta {
                field: spec.name.to_string(),
                before: assignments_json(old),
                after: assignments_json(new),
                detail: Some(DeltaDetail::Assignments(diff)),
            })
        }
    }
}

/// Membership delta of two unordered string lists, or `None` if they hold
/// the same members.
fn set_delta(old: &[String], new: &[String]) -> Option<SetDelta> {
    let old_set: HashSet<&str> = old.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new.iter().map(String::as_str).collect();
    if old_set == new_set {
        return None;
    }

    let sorted = |mut v: Vec<&str>| {
        v.sort_unstable();
        v.into_iter().map(str::to_string).collect::<Vec<_>>()
    };
    Some(SetDelta {
        added: sorted(new_set.difference(&old_set).copied().collect()),
        removed: sorted(old_set.difference(&new_set).copied().collect()),
        unchanged: sorted(old_set.intersection(&new_set).copied().collect()),
    })
}

fn assignments_json(map: Option<&AssignmentMap>) -> Value {
    match map {
        Some(map) => Value::Object(
            map.iter()
                .map(|(xml_id, remaps)| (xml_id.clone(), Value::from(remaps.clone())))
                .collect(),
        ),
        None => Value::Null,
    }
}

/// Compare two collection entries, typed or raw.
///
/// Two typed records go through [`compare`]. If either side is raw, the JSON
/// forms are compared instead. Identical JSON is equal. Two objects are
/// diffed over the schema's fields only, in schema order, with `null` and
/// absent treated alike as for typed scalars. Anything else is a single
/// whole-record delta.
pub fn compare_records<R: Serialize>(
    schema: &[FieldSpec<R>],
    before: &Record<R>,
    after: &Record<R>,
) -> Comparison<Vec<FieldDelta>> {
    if let (Record::Typed(b), Record::Typed(a)) = (before, after) {
        return compare(schema, b, a);
    }

    let (old, new) = (before.to_json(), after.to_json());
    if old == new {
        return Comparison::Equal;
    }

    let (Some(old_fields), Some(new_fields)) = (old.as_object(), new.as_object()) else {
        return Comparison::Different(vec![FieldDelta {
            field: WHOLE_RECORD_FIELD.to_string(),
            before: old,
            after: new,
            detail: None,
        }]);
    };

    let diff = build_diff(
        &schema_fields(schema, old_fields),
        &schema_fields(schema, new_fields),
    );
    let deltas: Vec<FieldDelta> = schema
        .iter()
        .filter_map(|spec| {
            let change = diff.fields.get(spec.name).filter(|c| c.is_change())?;
            Some(FieldDelta {
                field: spec.name.to_string(),
                before: change.old.clone().unwrap_or(Value::Null),
                after: change.new.clone().unwrap_or(Value::Null),
                detail: None,
            })
        })
        .collect();

    if deltas.is_empty() {
        Comparison::Equal
    } else {
        Comparison::Different(deltas)
    }
}

/// The schema's fields of a JSON object, with `null` values dropped.
///
/// Typed records serialize without unset fields or unknown keys, so a raw
/// object is reduced to the same shape before the two are diffed.
fn schema_fields<R>(schema: &[FieldSpec<R>], fields: &Map<String, Value>) -> Map<String, Value> {
    schema
        .iter()
        .filter_map(|spec| {
            let value = fields.get(spec.name).filter(|v| !v.is_null())?;
            Some((spec.name.to_string(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::schema::{CONTENT_ROUTER_SCHEMA, CONTENT_SERVER_SCHEMA};
    use crate::model::{ContentRouter, ContentServer};
    use serde_json::json;

    fn server(v: Value) -> ContentServer {
        serde_json::from_value(v).unwrap()
    }

    fn router(v: Value) -> ContentRouter {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_identical_records_are_equal() {
        let s = server(json!({
            "type": "EDGE",
            "ip": "10.0.0.1",
            "capabilities": ["HDD"],
            "deliveryServices": {"ds1": ["/a"]}
        }));
        assert!(compare(&CONTENT_SERVER_SCHEMA, &s, &s.clone()).is_equal());
    }

    #[test]
    fn test_null_and_absent_scalar_are_equal() {
        let a = router(json!({"fqdn": "tr.cdn.test", "ip6": null}));
        let b = router(json!({"fqdn": "tr.cdn.test"}));
        assert!(compare(&CONTENT_ROUTER_SCHEMA, &a, &b).is_equal());
    }

    #[test]
    fn test_scalar_change_reports_both_values() {
        let a = router(json!({"port": 80, "status": "ONLINE"}));
        let b = router(json!({"port": 8080, "status": "ONLINE"}));
        let deltas = compare(&CONTENT_ROUTER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        assert_eq!(
            deltas,
            vec![FieldDelta {
                field: "port".to_string(),
                before: json!(80),
                after: json!(8080),
                detail: None,
            }]
        );
    }

    #[test]
    fn test_deltas_follow_schema_order() {
        let a = server(json!({"type": "MID", "status": "ONLINE", "cacheGroup": "a"}));
        let b = server(json!({"type": "MID", "status": "OFFLINE", "cacheGroup": "b"}));
        let deltas = compare(&CONTENT_SERVER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        let fields: Vec<_> = deltas.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["cacheGroup", "status"]);
    }

    #[test]
    fn test_capability_order_is_ignored() {
        let a = server(json!({"type": "MID", "capabilities": ["HDD", "RAM"]}));
        let b = server(json!({"type": "MID", "capabilities": ["RAM", "HDD"]}));
        assert!(compare(&CONTENT_SERVER_SCHEMA, &a, &b).is_equal());
    }

    #[test]
    fn test_capability_membership_change() {
        let a = server(json!({"type": "MID", "capabilities": ["HDD", "RAM"]}));
        let b = server(json!({"type": "MID", "capabilities": ["RAM", "SSD"]}));
        let deltas = compare(&CONTENT_SERVER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(
            deltas[0].detail,
            Some(DeltaDetail::Set(SetDelta {
                added: vec!["SSD".to_string()],
                removed: vec!["HDD".to_string()],
                unchanged: vec!["RAM".to_string()],
            }))
        );
    }

    #[test]
    fn test_missing_capabilities_equal_empty() {
        let a = server(json!({"type": "MID"}));
        let b = server(json!({"type": "MID", "capabilities": []}));
        assert!(compare(&CONTENT_SERVER_SCHEMA, &a, &b).is_equal());
    }

    #[test]
    fn test_mid_servers_skip_assignments() {
        let a = server(json!({"type": "MID"}));
        assert!(compare(&CONTENT_SERVER_SCHEMA, &a, &a.clone()).is_equal());
    }

    #[test]
    fn test_edge_assignments_emptied() {
        let a = server(json!({"type": "EDGE", "deliveryServices": {"ds1": ["/a"]}}));
        let b = server(json!({"type": "EDGE", "deliveryServices": {}}));
        let deltas = compare(&CONTENT_SERVER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].field, "deliveryServices");
        assert_eq!(deltas[0].after, json!({}));
        match &deltas[0].detail {
            Some(DeltaDetail::Assignments(diff)) => assert_eq!(diff.removed, vec!["ds1"]),
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_mid_to_edge_reports_type_and_assignments() {
        let a = server(json!({"type": "MID"}));
        let b = server(json!({"type": "EDGE", "deliveryServices": {"ds1": ["/a"]}}));
        let deltas = compare(&CONTENT_SERVER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        let fields: Vec<_> = deltas.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "deliveryServices"]);
        assert_eq!(deltas[1].before, Value::Null);
    }

    #[test]
    fn test_edge_to_mid_removes_assignments() {
        let a = server(json!({"type": "EDGE", "deliveryServices": {"ds1": ["/a"], "ds2": ["/b"]}}));
        let b = server(json!({"type": "MID"}));
        let deltas = compare(&CONTENT_SERVER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        let fields: Vec<_> = deltas.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "deliveryServices"]);
        assert_eq!(deltas[1].before, json!({"ds1": ["/a"], "ds2": ["/b"]}));
        assert_eq!(deltas[1].after, Value::Null);
        match &deltas[1].detail {
            Some(DeltaDetail::Assignments(diff)) => {
                assert_eq!(diff.removed, vec!["ds1", "ds2"]);
                assert!(diff.added.is_empty());
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_assignments_left_on_mid_are_ignored() {
        let a = server(json!({"type": "EDGE", "deliveryServices": {"ds1": ["/a"]}}));
        let b = server(json!({"type": "MID", "deliveryServices": {"ds1": ["/a"]}}));
        let deltas = compare(&CONTENT_SERVER_SCHEMA, &a, &b)
            .into_difference()
            .unwrap();
        assert_eq!(deltas[1].field, "deliveryServices");
        assert_eq!(deltas[1].after, Value::Null);
    }

    #[test]
    fn test_routing_disabled_is_normalized() {
        let a = server(json!({"type": "MID", "routingDisabled": 0}));
        let b = server(json!({"type": "MID", "routingDisabled": false}));
        assert!(compare(&CONTENT_SERVER_SCHEMA, &a, &b).is_equal());
    }

    #[test]
    fn test_raw_records_compare_by_json() {
        let bad: Record<ContentServer> = Record::from_value(json!({"capabilities": "HDD"}));
        assert!(compare_records(&CONTENT_SERVER_SCHEMA, &bad, &bad.clone()).is_equal());

        let fixed: Record<ContentServer> = Record::from_value(json!({"capabilities": ["HDD"]}));
        let deltas = compare_records(&CONTENT_SERVER_SCHEMA, &bad, &fixed)
            .into_difference()
            .unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].field, "capabilities");
        assert_eq!(deltas[0].before, json!("HDD"));
        assert_eq!(deltas[0].after, json!(["HDD"]));
    }

    #[test]
    fn test_raw_record_null_matches_absent() {
        let bad: Record<ContentServer> =
            Record::from_value(json!({"type": "MID", "ip6": null, "capabilities": "HDD"}));
        let fixed: Record<ContentServer> =
            Record::from_value(json!({"type": "MID", "ip6": null, "capabilities": ["HDD"]}));
        assert!(bad.is_raw());
        assert!(!fixed.is_raw());

        let deltas = compare_records(&CONTENT_SERVER_SCHEMA, &bad, &fixed)
            .into_difference()
            .unwrap();
        let fields: Vec<_> = deltas.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["capabilities"]);
    }

    #[test]
    fn test_raw_record_unknown_keys_are_ignored() {
        let bad: Record<ContentServer> = Record::from_value(json!({
            "type": "MID",
            "port": {"nested": true},
            "lastUpdated": "2026-01-01"
        }));
        let fixed: Record<ContentServer> = Record::from_value(json!({
            "type": "MID",
            "port": 80,
            "lastUpdated": "2026-01-01"
        }));

        let deltas = compare_records(&CONTENT_SERVER_SCHEMA, &bad, &fixed)
            .into_difference()
            .unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].field, "port");
        assert_eq!(deltas[0].after, json!(80));
    }

    #[test]
    fn test_raw_records_differing_only_in_nulls_are_equal() {
        let a: Record<ContentRouter> = Record::from_value(json!({"port": [80], "ip6": null}));
        let b: Record<ContentRouter> = Record::from_value(json!({"port": [80]}));
        assert!(a.is_raw());
        assert!(compare_records(&CONTENT_ROUTER_SCHEMA, &a, &b).is_equal());
    }

    #[test]
    fn test_non_object_record_is_whole_record_delta() {
        let bad: Record<ContentRouter> = Record::from_value(json!("garbage"));
        let good: Record<ContentRouter> = Record::from_value(json!({"port": 80}));
        let deltas = compare_records(&CONTENT_ROUTER_SCHEMA, &bad, &good)
            .into_difference()
            .unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].field, WHOLE_RECORD_FIELD);
    }
}
