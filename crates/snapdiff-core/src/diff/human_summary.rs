//! Human-readable summary renderer for snapshot differences.

use crate::diff::model::{DeltaDetail, DifferenceResult, FieldDelta, SnapshotDifferences};
use serde_json::Value;

/// Render a Markdown summary of [`SnapshotDifferences`].
///
/// The summary is intended for review before a snapshot is deployed.
/// It is informational only and does not affect the structured diff.
pub fn render_human_summary(diff: &SnapshotDifferences) -> String {
    let mut out = String::new();

    out.push_str("## Snapshot Diff\n\n");
    out.push_str(&format!("**Pending changes**: {}\n\n", diff.pending_changes));

    if diff.pending_changes == 0 {
        out.push_str("_No pending changes._\n");
        return out;
    }

    render_collection(&mut out, "Content Routers", &diff.content_routers);
    render_collection(&mut out, "Content Servers", &diff.content_servers);

    out
}

fn render_collection<R>(out: &mut String, title: &str, result: &DifferenceResult<R>) {
    if result.is_unchanged() {
        return;
    }

    out.push_str(&format!("### {title} ({})\n\n", result.changes));

    if !result.new.is_empty() {
        let keys: Vec<&str> = result.new.iter().map(|e| e.key.as_str()).collect();
        out.push_str(&format!("- **New** ({}): {}\n", keys.len(), keys.join(", ")));
    }
    if !result.deleted.is_empty() {
        let keys: Vec<&str> = result.deleted.iter().map(|e| e.key.as_str()).collect();
        out.push_str(&format!(
            "- **Deleted** ({}): {}\n",
            keys.len(),
            keys.join(", ")
        ));
    }
    for entry in &result.changed {
        out.push_str(&format!("- **Changed**: `{}`\n", entry.key));
        for delta in &entry.deltas {
            render_delta(out, delta);
        }
    }
    out.push('\n');
}

fn render_delta(out: &mut String, delta: &FieldDelta) {
    match &delta.detail {
        None => out.push_str(&format!(
            "  - {}: `{}` → `{}`\n",
            delta.field,
            show(&delta.before),
            show(&delta.after)
        )),
        Some(DeltaDetail::Set(set)) => {
            out.push_str(&format!("  - {}:", delta.field));
            if !set.added.is_empty() {
                out.push_str(&format!(" +{}", set.added.join(", +")));
            }
            if !set.removed.is_empty() {
                out.push_str(&format!(" -{}", set.removed.join(", -")));
            }
            out.push('\n');
        }
        Some(DeltaDetail::Assignments(assignments)) => {
            out.push_str(&format!("  - {}:\n", delta.field));
            for xml_id in &assignments.added {
                out.push_str(&format!("    - added `{xml_id}`\n"));
            }
            for xml_id in &assignments.removed {
                out.push_str(&format!("    - removed `{xml_id}`\n"));
            }
            for change in &assignments.changed {
                out.push_str(&format!(
                    "    - changed `{}`: [{}] → [{}]\n",
                    change.xml_id,
                    change.before.join(", "),
                    change.after.join(", ")
                ));
            }
        }
    }
}

fn show(value: &Value) -> String {
    match value {
        Value::Null => "(unset)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
