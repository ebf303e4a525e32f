//! Test capture mode for deterministic logging assertions
//!
//! A layer that records events in memory so tests can assert on what
//! registration and bootstrap reported, keyed by the canonical schema fields.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use dbenum_core_types::schema::{
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_EVENT, FIELD_OP, FIELD_TYPE_KEY,
};

/// A captured log event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub type_key: Option<String>,
    pub err_kind: Option<String>,
    pub err_code: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Recorded value of any field, by its canonical name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn matches(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldRecorder(HashMap<String, String>);

impl FieldRecorder {
    fn put(&mut self, field: &Field, value: impl ToString) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value);
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event to a shared log
pub struct TestCaptureLayer {
    log: EventLog,
}

impl TestCaptureLayer {
    /// Create a layer and the handle reading what it records
    pub fn pair() -> (Self, TestCapture) {
        let log = EventLog::default();
        (
            Self {
                log: Arc::clone(&log),
            },
            TestCapture { log },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        let fields = recorder.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            type_key: fields.get(FIELD_TYPE_KEY).cloned(),
            err_kind: fields.get(FIELD_ERR_KIND).cloned(),
            err_code: fields.get(FIELD_ERR_CODE).cloned(),
            fields,
        };

        if let Ok(mut log) = self.log.lock() {
            log.push(captured);
        }
    }
}

/// Handle for reading captured events in tests
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    /// All captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Events for one operation and registry key, in emission order
    pub fn events_for(&self, op: &str, type_key: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op) && e.type_key.as_deref() == Some(type_key))
            .collect()
    }

    /// Assert that an event exists with the given operation and event name
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.matches(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Clear all captured events
    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber
///
/// Every call returns a handle to the same shared log. Tests running in the
/// same binary see each other's events, so filter by a unique key.
///
/// # Example
///
/// ```
/// use dbenum_core::logging_facility::test_capture::init_test_capture;
/// use dbenum_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("register_enum_type", type_key = "gender");
/// capture.assert_event_exists("register_enum_type", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::pair();
            // A subscriber installed earlier wins and the log stays empty
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_records_schema_fields() {
        let (layer, capture) = TestCaptureLayer::pair();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(
                op = "register_enum_type",
                event = "end_error",
                type_key = "gender",
                err_code = "ERR_REGISTRATION_FAILURE",
                frozen = true
            );
        });

        let events = capture.events_for("register_enum_type", "gender");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(events[0].event.as_deref(), Some("end_error"));
        assert_eq!(
            events[0].err_code.as_deref(),
            Some("ERR_REGISTRATION_FAILURE")
        );
        assert_eq!(events[0].fields.get("frozen"), Some(&"true".to_string()));

        capture.clear();
        assert!(capture.events().is_empty());
    }
}
