//! Deferred log aggregation
//!
//! Each completed invocation hands its log buffer to the [`LogAggregator`].
//! Buffers are queued in completion order and only printed once the whole
//! invocation tree has finished.

use std::io::{self, Write};
use std::sync::Arc;

use colored::*;
use tokio::sync::Mutex;
use trellis_protocol::{DeferredLogger, LogEntry, LogLevel};

use crate::tasks::get_label_color;

/// Completion-ordered queue of task log buffers, shared by concurrent branches.
#[derive(Debug, Clone, Default)]
pub struct LogAggregator {
    queue: Arc<Mutex<Vec<DeferredLogger>>>,
}

impl LogAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished task's buffer.
    pub async fn push(&self, logger: DeferredLogger) {
        self.queue.lock().await.push(logger);
    }

    /// Number of queued buffers (one per completed invocation).
    pub async fn len(&self) -> usize {
        self.queue.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }

    /// Tags of the queued buffers, in completion order.
    pub async fn tags(&self) -> Vec<String> {
        self.queue
            .lock()
            .await
            .iter()
            .map(|logger| logger.tag().to_string())
            .collect()
    }

    /// Remove and return every queued buffer.
    pub async fn drain(&self) -> Vec<DeferredLogger> {
        std::mem::take(&mut *self.queue.lock().await)
    }

    /// Print every queued entry to `out`, emptying the queue.
    pub async fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let loggers = self.drain().await;
        for entry in loggers.iter().flat_map(DeferredLogger::entries) {
            writeln!(out, "{}", render_entry(entry))?;
        }
        out.flush()
    }
}

/// One console line: `[label] level message {params}`.
pub fn render_entry(entry: &LogEntry) -> String {
    let tag = format!("[{}]", entry.tag)
        .color(get_label_color(&entry.tag))
        .bold();
    let (level, message) = match entry.level {
        LogLevel::Info => (entry.level.as_str().cyan(), entry.message.normal()),
        LogLevel::Warn => (entry.level.as_str().yellow(), entry.message.yellow()),
        LogLevel::Error => (entry.level.as_str().red().bold(), entry.message.red()),
    };

    let mut line = format!("{} {} {}", tag, level, message);
    if let Some(params) = &entry.params {
        line.push(' ');
        line.push_str(&params.to_string().dimmed().to_string());
    }
    line
}
