//! The fan-out/fan-in execution engine.
//!
//! One tokio task per node, dispatched the moment its in-degree reaches
//! zero; a single consumption loop drains exactly N completion events from
//! a shared mpsc channel and is the only place graph/result state is
//! mutated.  Fan-out is unbounded by design — there is no worker-pool cap
//! or admission control, and a calc function that never returns stalls the
//! run (known limitation, no cancellation or timeout exists).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use nodes::{CalcFn, NodeError, NodeGroup, NodeWrapper};

use crate::graph::DependencyGraph;
use crate::EngineError;

/// Timing and outcome of one node's single execution within a run.
///
/// Inserted into the execution-result map exactly once per node; never
/// overwritten.
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub error: Option<NodeError>,
}

impl ExecutionRecord {
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at - self.started_at
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Event a node task emits onto the completion channel when its calc
/// function returns.
struct Completion {
    name: String,
    record: ExecutionRecord,
}

/// Schedules one `NodeGroup` run: builds the dependency graph up front,
/// gates on the cycle check, executes with maximal parallelism, and keeps
/// the per-node records for inspection and reporting.
pub struct Scheduler<C> {
    ctx: Arc<C>,
    group: NodeGroup<C>,
    graph: DependencyGraph<C>,
    calc: CalcFn<C>,
    results: HashMap<String, ExecutionRecord>,
    run_id: Uuid,
}

impl<C: Send + Sync + 'static> Scheduler<C> {
    /// Build a scheduler for one run of `group`.
    ///
    /// # Errors
    /// Fails with a configuration error if the group repeats a node name or
    /// a dependency list references a node that isn't in the group.
    pub fn build(ctx: C, group: NodeGroup<C>, calc: CalcFn<C>) -> Result<Self, EngineError> {
        let graph = DependencyGraph::build(&group)?;
        Ok(Self {
            ctx: Arc::new(ctx),
            group,
            graph,
            calc,
            results: HashMap::new(),
            run_id: Uuid::new_v4(),
        })
    }

    /// True iff the dependency graph is acyclic.  Must be called, and must
    /// return true, before [`Scheduler::run`].  Works on a copy of the
    /// in-degree map, so repeated calls are stable and never disturb run
    /// state.
    pub fn circular_check(&self) -> bool {
        self.graph.is_acyclic(&self.group)
    }

    /// Execute the whole group and return the total wall-clock duration.
    ///
    /// Every zero-in-degree node is dispatched immediately; each completion
    /// event decrements its dependents' in-degree and dispatches any that
    /// reach zero.  The loop blocks until exactly N events have arrived.
    /// A node failure is recorded in that node's record only — dependents
    /// are still dispatched, and failure-propagation policy stays with the
    /// calc function.
    ///
    /// # Errors
    /// Returns [`EngineError::CycleDetected`] instead of deadlocking if the
    /// graph is cyclic.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub async fn run(&mut self) -> Result<Duration, EngineError> {
        if !self.circular_check() {
            return Err(EngineError::CycleDetected);
        }

        let started = Instant::now();
        let total = self.group.len();

        let (tx, mut rx) = mpsc::channel::<Completion>(total.max(1));
        // Private copy: the run loop is the only mutator, and the built map
        // stays pristine for repeated circular checks.
        let mut in_degree = self.graph.in_degree().clone();

        for nw in self.group.iter() {
            if matches!(in_degree.get(nw.name()), Some(0)) {
                self.spawn_node(nw.clone(), tx.clone());
            }
        }

        for _ in 0..total {
            let Completion { name, record } = rx
                .recv()
                .await
                .ok_or(EngineError::CompletionChannelClosed)?;

            if let Some(err) = &record.error {
                error!(node = %name, error = %err, "node run error");
            }
            self.results.entry(name.clone()).or_insert(record);

            for dependent in self.graph.relied_on_by(&name) {
                if let Some(deg) = in_degree.get_mut(dependent.name()) {
                    *deg -= 1;
                    if *deg == 0 {
                        self.spawn_node(dependent.clone(), tx.clone());
                    }
                }
            }
        }
        drop(tx);

        let elapsed = started.elapsed();
        info!(
            cost_ms = elapsed.as_millis() as u64,
            nodes = total,
            "dag run complete"
        );
        Ok(elapsed)
    }

    /// The record for `name`, or `None` if the node hasn't completed (or
    /// doesn't exist).
    pub fn execution_result(&self, name: &str) -> Option<&ExecutionRecord> {
        self.results.get(name)
    }

    /// The whole execution-result map, for reporting.
    pub fn execution_results(&self) -> &HashMap<String, ExecutionRecord> {
        &self.results
    }

    pub fn group(&self) -> &NodeGroup<C> {
        &self.group
    }

    pub fn context(&self) -> &Arc<C> {
        &self.ctx
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    fn spawn_node(&self, nw: NodeWrapper<C>, tx: mpsc::Sender<Completion>) {
        let ctx = Arc::clone(&self.ctx);
        let calc = Arc::clone(&self.calc);

        tokio::spawn(async move {
            let started_at = Utc::now();
            let error = (calc)(ctx, nw.clone()).await.err();
            let record = ExecutionRecord {
                started_at,
                ended_at: Utc::now(),
                error,
            };
            // A closed receiver means the run loop is already gone; the
            // record has nowhere to go.
            let _ = tx
                .send(Completion {
                    name: nw.name().to_owned(),
                    record,
                })
                .await;
        });
    }
}
