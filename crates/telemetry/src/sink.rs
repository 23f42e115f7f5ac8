use parking_lot::Mutex;
use serde_json::Value;

use crate::record::{LogLevel, LogRecord};

/// Destination for log records.
///
/// `submit` must not block the caller for long and must not panic on
/// malformed records; retry policy, if any, lives behind the sink.
pub trait LogSink {
    fn submit(&self, record: LogRecord);
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn submit(&self, record: LogRecord) {
        (**self).submit(record);
    }
}

/// Forwards records onto the `tracing` subscriber installed by the host
/// application.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn submit(&self, record: LogRecord) {
        let context = Value::Object(record.fields).to_string();
        match record.level {
            LogLevel::Debug => {
                tracing::debug!(source = record.source, context = %context, "{}", record.message)
            }
            LogLevel::Info => {
                tracing::info!(source = record.source, context = %context, "{}", record.message)
            }
            LogLevel::Warn => {
                tracing::warn!(source = record.source, context = %context, "{}", record.message)
            }
            LogLevel::Error => {
                tracing::error!(source = record.source, context = %context, "{}", record.message)
            }
        }
    }
}

/// Records everything in memory. Test support.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn submit(&self, record: LogRecord) {
        self.records.lock().push(record);
    }
}
