//! In-memory event capture for logging assertions.
//!
//! The capture layer records every event with the fields the snapdiff
//! macros emit pulled out: the operation triple (`component`, `op`, `event`)
//! for boundary events and the record pair (`record_kind`, `record_key`) for
//! per-record events.

use snapdiff_core_types::schema::{
    FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_RECORD_KEY, FIELD_RECORD_KIND,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const FIELD_MESSAGE: &str = "message";

/// One captured event.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub record_kind: Option<String>,
    pub record_key: Option<String>,
    pub message: Option<String>,
    /// Every other field, rendered as text.
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, target: &str, mut fields: HashMap<String, String>) -> Self {
        Self {
            level,
            target: target.to_string(),
            component: fields.remove(FIELD_COMPONENT),
            op: fields.remove(FIELD_OP),
            event: fields.remove(FIELD_EVENT),
            record_kind: fields.remove(FIELD_RECORD_KIND),
            record_key: fields.remove(FIELD_RECORD_KEY),
            message: fields.remove(FIELD_MESSAGE),
            fields,
        }
    }

    /// Whether this event is about the record `key` of kind `kind`.
    pub fn is_about(&self, kind: &str, key: &str) -> bool {
        self.record_kind.as_deref() == Some(kind) && self.record_key.as_deref() == Some(key)
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent::from_fields(*metadata.level(), metadata.target(), visitor.0);
        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Shared handle on the captured events.
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// All captured events, in emission order.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events of one operation, in emission order.
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Events about one snapshot record, in emission order.
    pub fn events_for_record(&self, kind: &str, key: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.is_about(kind, key))
            .collect()
    }

    /// Assert that `op` emitted `event`.
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events_for_op(op);
        assert!(
            events.iter().any(|e| e.event.as_deref() == Some(event)),
            "Expected event op={} event={} not found among {} events for that op",
            op,
            event,
            events.len()
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle.
///
/// Every call in a process returns the same handle, so tests sharing a
/// process should filter by a unique op or record key.
///
/// ```
/// use snapdiff_core::logging_facility::test_capture::init_test_capture;
/// use snapdiff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_op");
/// capture.assert_event_exists("doc_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = TestCaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).try_init().ok();
            TestCapture { events }
        })
        .clone()
}
