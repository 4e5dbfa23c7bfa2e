//! `DataWrapper` — the generic result-or-error envelope a node produces.

use tracelog::TraceLog;

use crate::NodeError;

/// What a node's `evaluate` hands back: an optional payload, an optional
/// error, and an optional human-readable reason for the error.
///
/// The wrapper is "ok" iff `error` is absent; `data` may legitimately be
/// `None` on success (a node that exists only for its side effects).
#[derive(Debug, Clone, Default)]
pub struct DataWrapper<T> {
    pub data: Option<T>,
    pub error: Option<NodeError>,
    pub reason: Option<String>,
}

impl<T> DataWrapper<T> {
    /// Successful result carrying a payload.
    pub fn of(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            reason: None,
        }
    }

    /// Successful result with no payload.
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
            reason: None,
        }
    }

    /// Failed result.
    pub fn from_error(error: NodeError) -> Self {
        Self {
            data: None,
            error: Some(error),
            reason: None,
        }
    }

    /// Failed result with an explanation for the failure.
    pub fn from_error_with_reason(error: NodeError, reason: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error),
            reason: Some(reason.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Unpack into a `Result`, surfacing the error if present.
    pub fn into_result(self) -> Result<Option<T>, NodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    /// Append a trace entry if this wrapper carries an error, then hand the
    /// wrapper back so the call chains.
    pub fn log_if_err(self, trace: &TraceLog, module: &str) -> Self {
        if let Some(err) = &self.error {
            match &self.reason {
                Some(reason) => trace.error(format!("[{module}] pack error: {err} ({reason})")),
                None => trace.error(format!("[{module}] pack error: {err}")),
            }
        }
        self
    }
}
