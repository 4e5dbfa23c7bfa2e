//! Sample tasks for the demo pipeline.
//!
//! `render_summary` depends on `fetch_profile`; `fetch_orders` is
//! independent and marked weak by the demo, so its (optionally injected)
//! failure is tolerated.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::sleep;

use nodes::{DagContext, DagNode, DataWrapper, NodeError};

pub struct FetchProfile;

#[async_trait]
impl DagNode<DagContext> for FetchProfile {
    fn name(&self) -> &str {
        "fetch_profile"
    }

    async fn evaluate(&self, _ctx: &DagContext) -> DataWrapper<Value> {
        sleep(Duration::from_millis(300)).await;
        DataWrapper::of(json!({ "user": "demo", "tier": "gold" }))
    }
}

pub struct FetchOrders {
    /// When set, simulate a backend failure so the weak-dependency path is
    /// visible in the report.
    pub fail: bool,
}

#[async_trait]
impl DagNode<DagContext> for FetchOrders {
    fn name(&self) -> &str {
        "fetch_orders"
    }

    async fn evaluate(&self, ctx: &DagContext) -> DataWrapper<Value> {
        sleep(Duration::from_millis(250)).await;
        if self.fail {
            return DataWrapper::from_error_with_reason(
                NodeError::Execution("orders backend unavailable".into()),
                "injected via --inject-failure",
            )
            .log_if_err(&ctx.trace, "orders");
        }
        DataWrapper::of(json!([
            { "order": 1001, "total": 42.5 },
            { "order": 1002, "total": 9.0 },
        ]))
    }
}

pub struct RenderSummary;

#[async_trait]
impl DagNode<DagContext> for RenderSummary {
    fn name(&self) -> &str {
        "render_summary"
    }

    fn depends_on(&self) -> Vec<String> {
        vec!["fetch_profile".to_string()]
    }

    async fn evaluate(&self, _ctx: &DagContext) -> DataWrapper<Value> {
        sleep(Duration::from_millis(150)).await;
        DataWrapper::empty()
    }
}
