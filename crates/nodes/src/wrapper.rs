//! `NodeWrapper` and `NodeGroup` — how callers hand a run's universe of
//! nodes to the engine.

use std::sync::Arc;

use crate::DagNode;

/// A node plus the caller's strong/weak dependency flag.
///
/// `strong = true` declares the caller's *intent* that this node's failure
/// is fatal to its dependents.  The engine never reads the flag; a calc
/// function that wants strong semantics must enforce them itself.
pub struct NodeWrapper<C> {
    node: Arc<dyn DagNode<C>>,
    strong: bool,
}

impl<C> Clone for NodeWrapper<C> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
            strong: self.strong,
        }
    }
}

impl<C: Send + Sync> NodeWrapper<C> {
    pub fn new(node: Arc<dyn DagNode<C>>, strong: bool) -> Self {
        Self { node, strong }
    }

    pub fn node(&self) -> &Arc<dyn DagNode<C>> {
        &self.node
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn depends_on(&self) -> Vec<String> {
        self.node.depends_on()
    }

    pub fn is_strong(&self) -> bool {
        self.strong
    }
}

/// Ordered collection of wrapped nodes defining one run.
///
/// Declaration order matters only for determinism of the cycle check's seed
/// queue; execution order is governed purely by dependencies.
pub struct NodeGroup<C> {
    wrappers: Vec<NodeWrapper<C>>,
}

impl<C: Send + Sync> NodeGroup<C> {
    pub fn new() -> Self {
        Self {
            wrappers: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            wrappers: Vec::with_capacity(capacity),
        }
    }

    /// Append a node with its strong/weak flag.
    pub fn push(&mut self, node: Arc<dyn DagNode<C>>, strong: bool) {
        self.wrappers.push(NodeWrapper::new(node, strong));
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeWrapper<C>> {
        self.wrappers.iter()
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}

impl<C: Send + Sync> Default for NodeGroup<C> {
    fn default() -> Self {
        Self::new()
    }
}
