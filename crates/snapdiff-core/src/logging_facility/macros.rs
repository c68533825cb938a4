//! Structured logging macros.
//!
//! Operation events carry `component`, `op` and `event` so a whole diff run
//! can be followed from start to end. Record events carry `record_kind` and
//! `record_key` so a single router or server can be followed through parsing
//! and diffing.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:ident) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::snapdiff_core_types::schema::$event,
        )
    };
    ($level:ident, $op:expr, $event:ident, $($field:tt)+) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::snapdiff_core_types::schema::$event,
            $($field)+
        )
    };
}

/// Log the start of an operation.
///
/// ```
/// # use snapdiff_core::log_op_start;
/// log_op_start!("snapshot_diff");
/// log_op_start!("snapshot_diff", current_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::__op_event!(info, $op, EVENT_START $(, $($field)+)?)
    };
}

/// Log the successful end of an operation. `duration_ms` is required.
///
/// ```
/// # use snapdiff_core::log_op_end;
/// log_op_end!("snapshot_diff", duration_ms = 42, pending_changes = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::__op_event!(info, $op, EVENT_END, duration_ms = $duration $(, $($field)+)?)
    };
}

/// Log a failed operation.
///
/// The error is converted into an [`ExError`](crate::errors::ExError), so the
/// event always carries `err.kind` and `err.code`.
///
/// ```
/// # use snapdiff_core::{log_op_error, errors::SnapDiffError};
/// let err = SnapDiffError::InvalidJson { message: "eof".to_string() };
/// log_op_error!("snapshot_parse", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)+)?
        )
    }};
}

/// Log a debug event about one snapshot record.
///
/// `$kind` is one of the `KIND_*` tags and `$key` the record's name or
/// hostname. Extra fields follow the message.
///
/// ```
/// # use snapdiff_core::log_record;
/// # use snapdiff_core::snapdiff_core_types::schema::KIND_CONTENT_SERVER;
/// log_record!(KIND_CONTENT_SERVER, "edge-1", "server changed tier", to = "MID");
/// ```
#[macro_export]
macro_rules! log_record {
    ($kind:expr, $key:expr, $msg:literal $(, $($field:tt)+)?) => {
        tracing::debug!(
            component = module_path!(),
            record_kind = $kind,
            record_key = %$key,
            $($($field)+,)?
            $msg
        )
    };
}
