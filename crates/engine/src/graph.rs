//! Dependency-graph construction and cycle detection.
//!
//! Rules enforced at build time:
//! 1. Node names must be unique within the group.
//! 2. Every name in a dependency list must resolve to a node in the group.
//!
//! Cycle detection is Kahn's algorithm run over a *copy* of the in-degree
//! map, so it can be repeated freely without disturbing the state the run
//! loop works from.

use std::collections::{HashMap, VecDeque};

use nodes::{NodeGroup, NodeWrapper};

use crate::EngineError;

/// The three maps the scheduler derives from a `NodeGroup`, built in one
/// O(V+E) pass.
pub struct DependencyGraph<C> {
    /// Node name → wrapper.  Keys are unique.
    name_to_node: HashMap<String, NodeWrapper<C>>,
    /// Node name → the nodes that depend on it (reverse dependencies).
    relied_on_by: HashMap<String, Vec<NodeWrapper<C>>>,
    /// Node name → count of direct dependencies.  This copy is never
    /// mutated; the cycle check and the run loop each clone it.
    in_degree: HashMap<String, usize>,
}

impl<C: Send + Sync> DependencyGraph<C> {
    /// Build the graph, failing fast on duplicate names or dangling
    /// dependency references.
    ///
    /// # Errors
    /// - [`EngineError::DuplicateNodeName`] if two nodes share a name.
    /// - [`EngineError::UnknownDependency`] if a dependency list names a
    ///   node missing from the group.
    pub fn build(group: &NodeGroup<C>) -> Result<Self, EngineError> {
        let mut name_to_node: HashMap<String, NodeWrapper<C>> =
            HashMap::with_capacity(group.len());
        for nw in group.iter() {
            if name_to_node
                .insert(nw.name().to_owned(), nw.clone())
                .is_some()
            {
                return Err(EngineError::DuplicateNodeName(nw.name().to_owned()));
            }
        }

        let mut relied_on_by: HashMap<String, Vec<NodeWrapper<C>>> = HashMap::new();
        let mut in_degree: HashMap<String, usize> = HashMap::with_capacity(group.len());

        for nw in group.iter() {
            let deps = nw.depends_on();
            for dep in &deps {
                if !name_to_node.contains_key(dep) {
                    return Err(EngineError::UnknownDependency {
                        node: nw.name().to_owned(),
                        dependency: dep.clone(),
                    });
                }
                relied_on_by.entry(dep.clone()).or_default().push(nw.clone());
            }
            in_degree.insert(nw.name().to_owned(), deps.len());
        }

        Ok(Self {
            name_to_node,
            relied_on_by,
            in_degree,
        })
    }

    pub fn node(&self, name: &str) -> Option<&NodeWrapper<C>> {
        self.name_to_node.get(name)
    }

    /// The nodes that directly depend on `name`.
    pub fn relied_on_by(&self, name: &str) -> &[NodeWrapper<C>] {
        self.relied_on_by
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The pristine in-degree map as built.  Callers clone it before
    /// mutating.
    pub fn in_degree(&self) -> &HashMap<String, usize> {
        &self.in_degree
    }

    /// Kahn's algorithm over a copy of the in-degree map.
    ///
    /// The queue is seeded with the zero-in-degree nodes in the group's
    /// declaration order, which makes the traversal deterministic per call.
    /// Returns true iff every node was visited (the graph is acyclic).
    pub fn is_acyclic(&self, group: &NodeGroup<C>) -> bool {
        let mut in_degree = self.in_degree.clone();

        let mut queue: VecDeque<&NodeWrapper<C>> = group
            .iter()
            .filter(|nw| matches!(in_degree.get(nw.name()), Some(0)))
            .collect();

        let mut visited = 0usize;
        while let Some(nw) = queue.pop_front() {
            visited += 1;

            for dependent in self.relied_on_by(nw.name()) {
                if let Some(deg) = in_degree.get_mut(dependent.name()) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        visited == group.len()
    }
}
