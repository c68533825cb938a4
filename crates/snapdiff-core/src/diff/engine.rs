//! Snapshot diff entry points.
//!
//! [`diff_content_routers`] and [`diff_content_servers`] diff one collection
//! each; [`diff_snapshots`] runs both and totals the pending changes;
//! [`compute_snapshot_diff`] does the same starting from raw document bytes.

#![allow(clippy::result_large_err)]

use crate::diff::aggregate::diff_collection;
use crate::diff::model::{DifferenceResult, SnapshotDifferences};
use crate::diff::schema::{CONTENT_ROUTER_SCHEMA, CONTENT_SERVER_SCHEMA};
use crate::errors::ExError;
use crate::model::{ContentRouter, ContentServer};
use crate::snapshot::{Collection, Snapshot};
use crate::{log_op_end, log_op_error, log_op_start, log_record};
use snapdiff_core_types::schema::{KIND_CONTENT_ROUTER, KIND_CONTENT_SERVER};

/// Diff the content routers of two snapshots.
pub fn diff_content_routers(
    current: &Collection<ContentRouter>,
    pending: &Collection<ContentRouter>,
) -> DifferenceResult<ContentRouter> {
    let result = diff_collection(&CONTENT_ROUTER_SCHEMA, current, pending);
    tracing::debug!(
        record_kind = KIND_CONTENT_ROUTER,
        current_len = current.len(),
        pending_len = pending.len(),
        changes = result.changes,
        "collection diffed"
    );
    result
}

/// Diff the content servers of two snapshots.
///
/// `deliveryServices` is only compared for edge servers. A server that moves
/// between tiers reports its `type` change, and its assignments are compared
/// against an empty map on the side where it was not an edge.
pub fn diff_content_servers(
    current: &Collection<ContentServer>,
    pending: &Collection<ContentServer>,
) -> DifferenceResult<ContentServer> {
    let result = diff_collection(&CONTENT_SERVER_SCHEMA, current, pending);

    for entry in &result.changed {
        if let (Some(before), Some(after)) = (entry.before.typed(), entry.after.typed()) {
            if before.tier() != after.tier() {
                log_record!(
                    KIND_CONTENT_SERVER,
                    entry.key,
                    "server changed tier",
                    from = ?before.tier(),
                    to = ?after.tier()
                );
            }
        }
    }

    tracing::debug!(
        record_kind = KIND_CONTENT_SERVER,
        current_len = current.len(),
        pending_len = pending.len(),
        changes = result.changes,
        "collection diffed"
    );
    result
}

/// Diff two parsed snapshots.
///
/// Never fails; `pending_changes` is zero exactly when both collections are
/// unchanged.
pub fn diff_snapshots(current: &Snapshot, pending: &Snapshot) -> SnapshotDifferences {
    log_op_start!(
        "snapshot_diff",
        current_len = current.content_routers.len() + current.content_servers.len(),
        pending_len = pending.content_routers.len() + pending.content_servers.len()
    );
    let start = std::time::Instant::now();

    let content_routers = diff_content_routers(&current.content_routers, &pending.content_routers);
    let content_servers = diff_content_servers(&current.content_servers, &pending.content_servers);
    let pending_changes = content_routers.changes + content_servers.changes;

    log_op_end!(
        "snapshot_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        pending_changes = pending_changes
    );

    SnapshotDifferences {
        content_routers,
        content_servers,
        pending_changes,
    }
}

/// Parse one snapshot document, tagging failures with the snapshot side.
///
/// # Errors
///
/// - `InvalidSnapshot` — the bytes are not JSON or the root is not an object
pub fn parse_snapshot(bytes: &[u8], side: &str) -> Result<Snapshot, ExError> {
    Snapshot::from_json_bytes(bytes).map_err(|e| {
        ExError::from(e)
            .with_op("snapshot_parse")
            .with_side(side)
    })
}

/// Diff two snapshot documents given as raw bytes.
///
/// # Errors
///
/// - `InvalidSnapshot` — either document is not JSON or its root is not an object;
///   the error's `side` names which one (`current` or `pending`)
pub fn compute_snapshot_diff(
    current_bytes: &[u8],
    pending_bytes: &[u8],
) -> Result<SnapshotDifferences, ExError> {
    let start = std::time::Instant::now();

    let parsed = parse_snapshot(current_bytes, "current")
        .and_then(|current| Ok((current, parse_snapshot(pending_bytes, "pending")?)));
    let (current, pending) = match parsed {
        Ok(pair) => pair,
        Err(err) => {
            log_op_error!(
                "snapshot_parse",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    };

    Ok(diff_snapshots(&current, &pending))
}
