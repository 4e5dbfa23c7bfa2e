//! The default shared execution context.

use tracelog::TraceLog;
use uuid::Uuid;

/// Context handed to every node of a run when the caller has no custom
/// context of their own: a run identifier plus a shared trace buffer.
///
/// Callers with richer needs define their own `C` — the engine is generic
/// over the context type and only ever clones the `Arc` around it.
#[derive(Debug)]
pub struct DagContext {
    /// Identifier for this run, mostly useful in log output.
    pub run_id: Uuid,
    /// Shared trace sink; safe for concurrent appends from node tasks.
    pub trace: TraceLog,
}

impl DagContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            trace: TraceLog::new(),
        }
    }
}

impl Default for DagContext {
    fn default() -> Self {
        Self::new()
    }
}
