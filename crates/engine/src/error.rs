//! Engine-level error types.

use thiserror::Error;

/// Errors produced by the scheduler (graph construction + execution).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ------ Configuration errors (before any execution) ------

    /// Two or more nodes in the group share a name.
    #[error("duplicate node name: '{0}'")]
    DuplicateNodeName(String),

    /// A node's dependency list names a node that isn't in the group.
    #[error("node '{node}' depends on unknown node '{dependency}'")]
    UnknownDependency { node: String, dependency: String },

    // ------ Execution preconditions ------

    /// The dependency graph contains a cycle; `run` refuses to start.
    #[error("dependency graph contains a cycle")]
    CycleDetected,

    /// The completion channel closed before every node reported.  Internal
    /// invariant breach; should not happen for a well-formed graph.
    #[error("completion channel closed before all nodes reported")]
    CompletionChannelClosed,
}
