//! Deferred, per-task log buffers.
//!
//! Tasks never print while they run. Each invocation owns a
//! [`DeferredLogger`] whose entries are handed to the engine when the task
//! completes and printed once the whole invocation tree has finished.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A single buffered message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Label of the task that produced the entry.
    pub tag: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

/// Append-only message buffer owned by one task invocation.
#[derive(Debug, Clone, Default)]
pub struct DeferredLogger {
    tag: String,
    entries: Vec<LogEntry>,
}

impl DeferredLogger {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            entries: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Changes the tag applied to entries appended from now on.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>, params: Option<JsonValue>) {
        self.entries.push(LogEntry {
            level,
            tag: self.tag.clone(),
            message: message.into(),
            params,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message, None);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message, None);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message, None);
    }

    pub fn info_with(&mut self, message: impl Into<String>, params: JsonValue) {
        self.log(LogLevel::Info, message, Some(params));
    }

    pub fn warn_with(&mut self, message: impl Into<String>, params: JsonValue) {
        self.log(LogLevel::Warn, message, Some(params));
    }

    pub fn error_with(&mut self, message: impl Into<String>, params: JsonValue) {
        self.log(LogLevel::Error, message, Some(params));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_keep_append_order_and_tag() {
        let mut logger = DeferredLogger::new("Build");
        logger.info("starting");
        logger.warn_with("slow disk", json!({ "ms": 120 }));
        logger.error("gave up");

        let levels: Vec<_> = logger.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
        assert!(logger.entries().iter().all(|e| e.tag == "Build"));
        assert_eq!(logger.entries()[1].params, Some(json!({ "ms": 120 })));
    }

    #[test]
    fn test_set_tag_only_affects_later_entries() {
        let mut logger = DeferredLogger::new("old");
        logger.info("first");
        logger.set_tag("new");
        logger.info("second");

        let entries = logger.into_entries();
        assert_eq!(entries[0].tag, "old");
        assert_eq!(entries[1].tag, "new");
    }

    #[test]
    fn test_entry_serialization_omits_missing_params() {
        let mut logger = DeferredLogger::new("t");
        logger.info("hello");
        let value = serde_json::to_value(&logger.entries()[0]).unwrap();
        assert_eq!(value, json!({ "level": "info", "tag": "t", "message": "hello" }));
    }
}
