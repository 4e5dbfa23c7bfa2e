//! The `DagNode` trait — the contract every schedulable unit must fulfil —
//! plus the calc-function type the engine drives nodes through.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{DataWrapper, NodeError, NodeWrapper};

/// The core node trait.
///
/// `C` is the shared execution context handed to every node in a run.  The
/// engine guarantees `evaluate` is called at most once per run, and only
/// after every node named in `depends_on` has completed.  It guarantees
/// nothing else: independent nodes run concurrently, so any state a node
/// touches through `C` must carry its own synchronization.
#[async_trait]
pub trait DagNode<C>: Send + Sync
where
    C: Send + Sync,
{
    /// Node name, unique within a `NodeGroup`.  Dependency lists refer to
    /// nodes by this name.
    fn name(&self) -> &str;

    /// Names of the nodes this one must wait for.
    fn depends_on(&self) -> Vec<String> {
        Vec::new()
    }

    /// Perform the node's work and wrap the outcome.
    async fn evaluate(&self, ctx: &C) -> DataWrapper<Value>;
}

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Caller-supplied wrapper around node execution.
///
/// The engine invokes this exactly once per node and records the returned
/// error (if any) in the node's execution record.  All failure-propagation
/// policy — including what a "strong" dependency's failure should mean —
/// lives here, not in the engine.
pub type CalcFn<C> =
    Arc<dyn Fn(Arc<C>, NodeWrapper<C>) -> BoxFuture<Result<(), NodeError>> + Send + Sync>;

/// The default calc function: evaluate the node and surface the wrapper's
/// error, ignoring the payload and the strong/weak flag.
pub fn default_calc<C>() -> CalcFn<C>
where
    C: Send + Sync + 'static,
{
    Arc::new(|ctx, nw| {
        Box::pin(async move {
            nw.node().evaluate(ctx.as_ref()).await.into_result()?;
            Ok(())
        })
    })
}
