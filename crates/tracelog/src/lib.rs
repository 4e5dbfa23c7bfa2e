//! `tracelog` crate — a thread-safe, append-only trace buffer.
//!
//! Node executions run concurrently, so any log sink they share must carry
//! its own synchronization (the engine provides none beyond dependency
//! ordering).  [`TraceLog`] is that sink: independent tasks append leveled
//! entries, and after the run the whole trace can be inspected or dumped as
//! pretty JSON.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Severity of a single trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceLevel {
    Ok,
    Warn,
    Error,
}

/// One appended trace line.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub level: TraceLevel,
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Append-only trace buffer safe to share across concurrent node tasks.
///
/// Entries keep their append order; two appends racing from independent
/// tasks may land in either order, which mirrors the engine's own
/// completion-order guarantee (none, beyond causality).
#[derive(Debug, Default)]
pub struct TraceLog {
    entries: Mutex<Vec<TraceEntry>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at an explicit level.
    pub fn push(&self, level: TraceLevel, message: impl Into<String>) {
        let entry = TraceEntry {
            level,
            at: Utc::now(),
            message: message.into(),
        };
        // A poisoned lock means another task panicked mid-append; the trace
        // is best-effort diagnostics, so keep accepting entries.
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry);
    }

    pub fn ok(&self, message: impl Into<String>) {
        self.push(TraceLevel::Ok, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.push(TraceLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(TraceLevel::Error, message);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the current entries out of the buffer.
    pub fn snapshot(&self) -> Vec<TraceEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Render the whole trace as indented JSON.  Returns an empty string if
    /// serialization fails.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn entries_keep_append_order() {
        let log = TraceLog::new();
        log.ok("first");
        log.warn("second");
        log.error("third");

        let entries = log.snapshot();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[0].level, TraceLevel::Ok);
        assert_eq!(entries[2].level, TraceLevel::Error);
    }

    #[test]
    fn concurrent_appends_are_all_recorded() {
        let log = Arc::new(TraceLog::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let log = Arc::clone(&log);
            handles.push(std::thread::spawn(move || {
                for j in 0..25 {
                    log.ok(format!("worker {i} entry {j}"));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(log.len(), 8 * 25);
    }

    #[test]
    fn pretty_json_contains_levels_and_messages() {
        let log = TraceLog::new();
        log.error("boom");

        let json = log.to_pretty_json();
        assert!(json.contains("\"error\""));
        assert!(json.contains("boom"));
    }
}
