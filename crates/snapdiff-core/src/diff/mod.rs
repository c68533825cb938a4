//! Snapshot diff engine.
//!
//! Compares a current and a pending CDN snapshot and reports, per record
//! type, which records are new, deleted, unchanged or changed, together with
//! the field-level deltas of every changed record.
//!
//! ## Entry point
//!
//! ```ignore
//! use snapdiff_core::diff::engine::compute_snapshot_diff;
//!
//! let diff = compute_snapshot_diff(current_bytes, pending_bytes)?;
//! let summary = snapdiff_core::diff::human_summary::render_human_summary(&diff);
//! ```
//!
//! ## Layers
//!
//! - [`reconcile`]: partitions two key sets in O(n + m)
//! - [`compare`]: compares two records under a static [`schema`]
//! - [`assignments`]: compares delivery-service assignment maps
//! - [`aggregate`]: categorizes a whole collection
//!
//! ## Guarantees
//!
//! - **Partition**: every key of either collection appears in exactly one category.
//! - **Determinism**: every category is sorted by key, so identical inputs
//!   produce identical output regardless of collection iteration order.
//! - **Fail-soft**: malformed records are compared as raw JSON; the engine
//!   never aborts a diff.

pub mod aggregate;
pub mod assignments;
pub mod compare;
pub mod engine;
pub mod human_summary;
pub mod model;
pub mod reconcile;
pub mod record_diff;
pub mod schema;

pub use aggregate::diff_collection;
pub use engine::{compute_snapshot_diff, diff_content_routers, diff_content_servers, diff_snapshots};
pub use human_summary::render_human_summary;
pub use model::{DifferenceResult, FieldDelta, SnapshotDifferences};
pub use record_diff::build_diff;
