//! snapdiff core - CDN snapshot differencing
//!
//! This crate compares a current (deployed) and a pending (staged) CDN
//! snapshot and reports what deploying the pending one would change:
//! - Typed content router and content server records with lenient parsing
//! - Key reconciliation, field comparison and assignment-map diffing
//! - Per-collection categorization into new, deleted, unchanged and changed
//! - A Markdown summary renderer for review
//!
//! The engine is pure: no I/O, and no failure once both documents parse.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;

// Used by the exported logging macros
pub use snapdiff_core_types;

// Re-export commonly used types
pub use diff::{compute_snapshot_diff, diff_snapshots, render_human_summary, SnapshotDifferences};
pub use errors::{ExError, ExErrorKind, Result, SnapDiffError};
pub use model::{ContentRouter, ContentServer, Record};
pub use snapshot::Snapshot;
