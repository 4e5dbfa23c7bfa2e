//! `MockNode` — a test double for `DagNode`.
//!
//! Useful in unit and integration tests where a real node implementation is
//! either unavailable or irrelevant.  The mock records how often it was
//! evaluated, can simulate work with a delay, and appends its name to the
//! context's trace on completion so tests can assert causal ordering.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{DagContext, DagNode, DataWrapper, NodeError};

/// Behaviour injected into `MockNode` at construction time.
pub enum MockBehaviour {
    /// Succeed with a specific JSON value.
    ReturnValue(Value),
    /// Fail with an execution error.
    Fail(String),
}

/// A mock node with a fixed name, dependency list, and behaviour.
pub struct MockNode {
    name: String,
    deps: Vec<String>,
    behaviour: MockBehaviour,
    delay: Option<Duration>,
    calls: Arc<Mutex<u32>>,
}

impl MockNode {
    /// Create a mock that succeeds with the given value.
    pub fn returning(name: impl Into<String>, deps: &[&str], value: Value) -> Self {
        Self {
            name: name.into(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            behaviour: MockBehaviour::ReturnValue(value),
            delay: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock that fails with the given message.
    pub fn failing(name: impl Into<String>, deps: &[&str], msg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            behaviour: MockBehaviour::Fail(msg.into()),
            delay: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Simulate work by sleeping before producing the result.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times this node has been evaluated.
    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }

    /// Handle for asserting the call count after the node has been moved
    /// into an `Arc<dyn DagNode>`.
    pub fn call_counter(&self) -> Arc<Mutex<u32>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DagNode<DagContext> for MockNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn depends_on(&self) -> Vec<String> {
        self.deps.clone()
    }

    async fn evaluate(&self, ctx: &DagContext) -> DataWrapper<Value> {
        *self.calls.lock().unwrap() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behaviour {
            MockBehaviour::ReturnValue(value) => {
                ctx.trace.ok(format!("{} done", self.name));
                DataWrapper::of(value.clone())
            }
            MockBehaviour::Fail(msg) => {
                ctx.trace.error(format!("{} failed: {msg}", self.name));
                DataWrapper::from_error(NodeError::Execution(msg.clone()))
            }
        }
    }
}
