//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Record identifiers
pub const FIELD_RECORD_KIND: &str = "record_kind";
pub const FIELD_RECORD_KEY: &str = "record_key";

// Collection sizes
pub const FIELD_CURRENT_LEN: &str = "current_len";
pub const FIELD_PENDING_LEN: &str = "pending_len";
pub const FIELD_PENDING_CHANGES: &str = "pending_changes";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Record kinds
pub const KIND_CONTENT_ROUTER: &str = "content_router";
pub const KIND_CONTENT_SERVER: &str = "content_server";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_record_kinds_are_distinct() {
        assert_ne!(KIND_CONTENT_ROUTER, KIND_CONTENT_SERVER);
    }
}
