//! Bounded in-memory log store
//!
//! Every `tracing` event passing through [`LogBufferLayer`] is kept as a
//! [`LogEntry`] with its level, message, timestamp and structured fields.
//! When the buffer grows past its capacity the oldest `trim` entries are
//! dropped in one go.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

pub const DEFAULT_CAPACITY: usize = 1000;
pub const DEFAULT_TRIM: usize = 100;

static GLOBAL_LOG_BUFFER: OnceLock<Arc<LogBuffer>> = OnceLock::new();

/// Process-wide log store used by [`crate::system::init_logging`].
pub fn global_log_buffer() -> Arc<LogBuffer> {
    GLOBAL_LOG_BUFFER
        .get_or_init(|| Arc::new(LogBuffer::new(DEFAULT_CAPACITY, DEFAULT_TRIM)))
        .clone()
}

/// Install a sized global buffer. Returns `false` if one already exists.
pub fn set_global_log_buffer(buffer: Arc<LogBuffer>) -> bool {
    GLOBAL_LOG_BUFFER.set(buffer).is_ok()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

struct Inner {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

pub struct LogBuffer {
    inner: Mutex<Inner>,
    capacity: usize,
    trim: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TRIM)
    }
}

impl LogBuffer {
    /// `trim` is clamped to `1..=capacity`.
    pub fn new(capacity: usize, trim: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                entries: VecDeque::with_capacity(capacity + 1),
                next_id: 1,
            }),
            capacity,
            trim: trim.clamp(1, capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, level: impl Into<String>, message: impl Into<String>, data: Option<Value>) {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push_back(LogEntry {
            id,
            timestamp: Utc::now(),
            level: level.into(),
            message: message.into(),
            data,
        });

        if inner.entries.len() > self.capacity {
            inner.entries.drain(..self.trim);
        }
    }

    /// Snapshot, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner.lock().entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}

/// `tracing-subscriber` layer feeding a [`LogBuffer`].
pub struct LogBufferLayer {
    buffer: Arc<LogBuffer>,
}

impl LogBufferLayer {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

impl<S: Subscriber> Layer<S> for LogBufferLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);

        let data = if visitor.fields.is_empty() {
            None
        } else {
            Some(Value::Object(visitor.fields))
        };

        self.buffer.push(
            event.metadata().level().as_str(),
            visitor.message.unwrap_or_default(),
            data,
        );
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .insert(field.name().to_string(), Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields
                .insert(field.name().to_string(), Value::from(rendered));
        }
    }
}
