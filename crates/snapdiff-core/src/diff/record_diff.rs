//! Untyped field-by-field diff of two flat JSON objects.

use crate::diff::model::{FieldChange, RecordDiff};
use serde_json::{Map, Value};

/// Compare two JSON objects field by field.
///
/// Every field present on either side is listed. `num` counts the fields
/// whose values differ; a field present on only one side counts, and `null`
/// is distinct from absent here.
pub fn build_diff(current: &Map<String, Value>, pending: &Map<String, Value>) -> RecordDiff {
    let mut diff = RecordDiff::default();

    for (name, old) in current {
        let change = FieldChange {
            old: Some(old.clone()),
            new: pending.get(name).cloned(),
        };
        if change.is_change() {
            diff.num += 1;
        }
        diff.fields.insert(name.clone(), change);
    }

    for (name, new) in pending {
        if !current.contains_key(name) {
            diff.num += 1;
            diff.fields.insert(
                name.clone(),
                FieldChange {
                    old: None,
                    new: Some(new.clone()),
                },
            );
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_generic_record_differences() {
        let a = obj(json!({"foo": "bar", "gee": "whiz", "test": "quest"}));
        let b = obj(json!({"fizz": "buzz", "gee": "willikers", "test": "quest"}));

        let diff = build_diff(&a, &b);
        assert_eq!(diff.num, 3);
        assert_eq!(diff.fields["foo"].old, Some(json!("bar")));
        assert_eq!(diff.fields["foo"].new, None);
        assert_eq!(diff.fields["fizz"].old, None);
        assert_eq!(diff.fields["fizz"].new, Some(json!("buzz")));
        assert_eq!(diff.fields["gee"].new, Some(json!("willikers")));
        assert!(!diff.fields["test"].is_change());
    }

    #[test]
    fn test_null_differs_from_absent() {
        let diff = build_diff(&obj(json!({"ip6": null})), &obj(json!({})));
        assert_eq!(diff.num, 1);
    }
}
