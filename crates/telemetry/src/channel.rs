use std::sync::mpsc::{self, Receiver, Sender};

use crate::record::{Fields, LogLevel, LogRecord};
use crate::sink::LogSink;

/// Emitting half of the logging channel.
///
/// Cloneable and cheap; `emit` never blocks and never fails from the caller's
/// point of view. If the consumer has gone away the record is dropped.
#[derive(Debug, Clone)]
pub struct LogHandle {
    tx: Option<Sender<LogRecord>>,
}

impl LogHandle {
    /// A handle that discards everything.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, record: LogRecord) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(record);
        }
    }

    pub fn debug(&self, source: &'static str, message: impl Into<String>, fields: Fields) {
        self.emit_with(LogLevel::Debug, source, message, fields);
    }

    pub fn info(&self, source: &'static str, message: impl Into<String>, fields: Fields) {
        self.emit_with(LogLevel::Info, source, message, fields);
    }

    fn emit_with(
        &self,
        level: LogLevel,
        source: &'static str,
        message: impl Into<String>,
        fields: Fields,
    ) {
        if self.tx.is_none() {
            return;
        }
        let mut record = LogRecord::new(level, source, message);
        record.fields = fields;
        self.emit(record);
    }
}

/// Consuming half of the logging channel.
pub struct LogDrain {
    rx: Receiver<LogRecord>,
}

impl LogDrain {
    /// Takes every record currently queued. Non-blocking.
    pub fn drain(&self) -> Vec<LogRecord> {
        self.rx.try_iter().collect()
    }

    /// Pumps records into `sink` until every emitting handle is dropped.
    pub fn forward_to(self, sink: &dyn LogSink) {
        while let Ok(record) = self.rx.recv() {
            sink.submit(record);
        }
    }
}

/// Creates a connected emitter/consumer pair.
pub fn channel() -> (LogHandle, LogDrain) {
    let (tx, rx) = mpsc::channel();
    (LogHandle { tx: Some(tx) }, LogDrain { rx })
}

/// Spawns a detached thread that forwards records into `sink`.
///
/// The thread exits once every `LogHandle` clone is dropped. Mutators keep
/// running regardless of what happens on this thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_logger<S>(sink: S) -> (LogHandle, std::thread::JoinHandle<()>)
where
    S: LogSink + Send + 'static,
{
    let (handle, drain) = channel();
    let join = std::thread::spawn(move || drain.forward_to(&sink));
    (handle, join)
}

#[cfg(test)]
mod tests {
    use super::{channel, LogHandle};
    use crate::record::{Fields, LogLevel, LogRecord};

    #[test]
    fn emitted_records_arrive_in_order() {
        let (handle, drain) = channel();
        handle.debug("t", "one", Fields::new());
        handle.info("t", "two", Fields::new());

        let records = drain.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "one");
        assert_eq!(records[0].level, LogLevel::Debug);
        assert_eq!(records[1].message, "two");
        assert_eq!(records[1].level, LogLevel::Info);
    }

    #[test]
    fn emit_after_consumer_dropped_is_swallowed() {
        let (handle, drain) = channel();
        drop(drain);
        // Must not panic or error.
        handle.emit(LogRecord::debug("t", "late"));
    }

    #[test]
    fn disabled_handle_discards() {
        let handle = LogHandle::disabled();
        handle.emit(LogRecord::info("t", "nowhere"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn spawned_logger_receives_records() {
        use crate::sink::MemorySink;
        use std::sync::Arc;

        let sink = Arc::new(MemorySink::new());
        let (handle, join) = super::spawn_logger(Arc::clone(&sink));
        handle.emit(LogRecord::info("t", "hello"));
        drop(handle);
        join.join().expect("logger thread");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "hello");
    }
}
