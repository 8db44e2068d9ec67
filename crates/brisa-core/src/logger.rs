//! Structured logging sink.
//!
//! The client never writes log output directly for user-facing diagnostics.
//! Instead it hands a message plus a field map to a [`Logger`] chosen by the
//! caller. [`NoopLogger`] is the default, so an unconfigured client stays
//! silent and never needs a null check.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Field map attached to a log record. Ordered for stable output.
pub type Fields = BTreeMap<String, Value>;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Verbose debugging information.
    Debug,
    /// Routine operational messages.
    Info,
    /// Non-critical issues worth a look.
    Warn,
    /// Failures.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// A leveled, field-annotated log sink.
///
/// Implementations must be thread-safe: one logger is shared by every request
/// a client issues.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Emit one record.
    fn log(&self, level: Level, message: &str, fields: &Fields);

    /// Emit a debug record.
    fn debug(&self, message: &str, fields: &Fields) {
        self.log(Level::Debug, message, fields);
    }

    /// Emit an info record.
    fn info(&self, message: &str, fields: &Fields) {
        self.log(Level::Info, message, fields);
    }

    /// Emit a warning record.
    fn warn(&self, message: &str, fields: &Fields) {
        self.log(Level::Warn, message, fields);
    }

    /// Emit an error record.
    fn error(&self, message: &str, fields: &Fields) {
        self.log(Level::Error, message, fields);
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _message: &str, _fields: &Fields) {}
}

/// Forwards records to the `tracing` ecosystem.
///
/// Fields are rendered as a single JSON object in a `fields` attribute,
/// since `tracing` needs field names at compile time.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: &Fields) {
        let fields = Value::Object(fields.clone().into_iter().collect());
        match level {
            Level::Debug => tracing::debug!(fields = %fields, "{}", message),
            Level::Info => tracing::info!(fields = %fields, "{}", message),
            Level::Warn => tracing::warn!(fields = %fields, "{}", message),
            Level::Error => tracing::error!(fields = %fields, "{}", message),
        }
    }
}

/// One captured record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
    /// Attached fields.
    pub fields: Fields,
}

impl Record {
    /// Look up a field as a string slice.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Keeps every record in memory.
///
/// Handy for tests and for callers that want to inspect what the client
/// reported after the fact.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<Record>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Records whose message equals `message`.
    pub fn records_with_message(&self, message: &str) -> Vec<Record> {
        self.lock()
            .iter()
            .filter(|r| r.message == message)
            .cloned()
            .collect()
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str, fields: &Fields) {
        self.lock().push(Record {
            level,
            message: message.to_string(),
            fields: fields.clone(),
        });
    }
}

/// Build a [`Fields`] map from `key => value` pairs.
///
/// ```rust
/// use brisa_core::fields;
///
/// let f = fields! { "status" => 200, "url" => "https://example.com" };
/// assert_eq!(f.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::logger::Fields::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::logger::Fields::new();
        $( map.insert(::std::string::String::from($key), $crate::__private::json!($value)); )+
        map
    }};
}
