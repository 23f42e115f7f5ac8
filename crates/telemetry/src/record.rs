use serde_json::{Map, Value};

/// Severity of a log record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Free-form structured context attached to a record.
pub type Fields = Map<String, Value>;

/// A single structured log record.
///
/// `source` is a constant tag naming the emitting component; `fields` carries
/// arbitrary JSON context. Records are plain data so they can cross the
/// emission channel and be inspected in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub source: &'static str,
    pub fields: Fields,
}

impl LogRecord {
    pub fn new(level: LogLevel, source: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            source,
            fields: Fields::new(),
        }
    }

    pub fn debug(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, source, message)
    }

    pub fn info(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, source, message)
    }

    pub fn warn(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, source, message)
    }

    pub fn error(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, source, message)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}
