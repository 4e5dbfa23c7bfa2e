//! Node-level error type.

use thiserror::Error;

/// Errors returned by a node's `evaluate` (or by a calc function wrapping
/// it).
///
/// The engine records the error in the node's execution record and moves on;
/// it never inspects the variant.  `StrongDependency` exists for caller-side
/// policy code that chooses to fail a node because one of its strong
/// dependencies failed — the engine itself enforces no such rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The node's own work failed.
    #[error("node execution failed: {0}")]
    Execution(String),

    /// A caller-side calc function refused to run the node because the named
    /// strong dependency failed.
    #[error("strong dependency '{0}' failed")]
    StrongDependency(String),
}
