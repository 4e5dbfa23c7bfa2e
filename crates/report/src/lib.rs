//! `report` crate — read-only rendering of a completed (or attempted) run.
//!
//! Consumes a `NodeGroup` plus the execution-result map and produces a
//! Graphviz DOT description: nodes annotated with status and duration,
//! edges annotated with the dependency's outcome.  Nothing here feeds back
//! into scheduling.

use std::collections::HashMap;
use std::fmt::Write as _;

use engine::ExecutionRecord;
use nodes::NodeGroup;

const OK_FILL: &str = "#90EE90";
const ERROR_FILL: &str = "#FFB6C1";
const SKIPPED_FILL: &str = "gray90";

/// Render the post-run graph as Graphviz DOT.
///
/// Nodes without a record (not executed — e.g. the run was never started)
/// are drawn gray, successful nodes light green, failed nodes light red.
/// Each edge carries its dependency's status and duration; an edge from a
/// node that never executed is dashed.
pub fn dot_graph<C: Send + Sync>(
    group: &NodeGroup<C>,
    results: &HashMap<String, ExecutionRecord>,
) -> String {
    let mut dot = String::new();
    dot.push_str("digraph G {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box style=filled];\n\n");

    for nw in group.iter() {
        let name = nw.name();
        match results.get(name) {
            None => {
                let _ = writeln!(
                    dot,
                    "  {name:?} [label=\"{name}\\n(Not Executed)\" fillcolor={SKIPPED_FILL}];"
                );
            }
            Some(record) => {
                let (status, fill) = if record.is_ok() {
                    ("Ok", OK_FILL)
                } else {
                    ("Error", ERROR_FILL)
                };
                let _ = writeln!(
                    dot,
                    "  {name:?} [label=\"{name}\\n{status}\\n{}ms\" fillcolor=\"{fill}\"];",
                    record.duration().num_milliseconds()
                );
            }
        }
    }

    dot.push('\n');
    for nw in group.iter() {
        for dep in nw.depends_on() {
            match results.get(&dep) {
                None => {
                    let _ = writeln!(
                        dot,
                        "  {dep:?} -> {:?} [label=\"(dep not executed)\" style=dashed];",
                        nw.name()
                    );
                }
                Some(record) => {
                    let (status, color) = if record.is_ok() {
                        ("ok", "green")
                    } else {
                        ("error", "red")
                    };
                    let _ = writeln!(
                        dot,
                        "  {dep:?} -> {:?} [label=\"{status} ({}ms)\" color={color}];",
                        nw.name(),
                        record.duration().num_milliseconds()
                    );
                }
            }
        }
    }

    dot.push_str("}\n");
    dot
}

/// Shareable GraphvizOnline link for a DOT description.
pub fn share_url(dot: &str) -> String {
    format!(
        "https://dreampuf.github.io/GraphvizOnline/#{}",
        urlencoding::encode(dot)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use nodes::mock::MockNode;
    use nodes::{DagContext, NodeError};
    use serde_json::json;
    use std::sync::Arc;

    fn record(cost_ms: i64, error: Option<NodeError>) -> ExecutionRecord {
        let started_at = Utc::now();
        ExecutionRecord {
            started_at,
            ended_at: started_at + Duration::milliseconds(cost_ms),
            error,
        }
    }

    fn two_node_group() -> NodeGroup<DagContext> {
        let mut group = NodeGroup::with_capacity(2);
        group.push(Arc::new(MockNode::returning("fetch", &[], json!(null))), false);
        group.push(
            Arc::new(MockNode::returning("render", &["fetch"], json!(null))),
            false,
        );
        group
    }

    #[test]
    fn successful_run_renders_green_nodes_and_edges() {
        let group = two_node_group();
        let mut results = HashMap::new();
        results.insert("fetch".to_string(), record(12, None));
        results.insert("render".to_string(), record(7, None));

        let dot = dot_graph(&group, &results);
        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("\"fetch\" [label=\"fetch\\nOk\\n12ms\" fillcolor=\"#90EE90\"];"));
        assert!(dot.contains("\"fetch\" -> \"render\" [label=\"ok (12ms)\" color=green];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn failed_dependency_renders_red() {
        let group = two_node_group();
        let mut results = HashMap::new();
        results.insert(
            "fetch".to_string(),
            record(3, Some(NodeError::Execution("boom".into()))),
        );
        results.insert("render".to_string(), record(5, None));

        let dot = dot_graph(&group, &results);
        assert!(dot.contains("\"fetch\" [label=\"fetch\\nError\\n3ms\" fillcolor=\"#FFB6C1\"];"));
        assert!(dot.contains("\"fetch\" -> \"render\" [label=\"error (3ms)\" color=red];"));
    }

    #[test]
    fn unexecuted_nodes_render_gray_and_dashed() {
        let group = two_node_group();
        let results = HashMap::new();

        let dot = dot_graph(&group, &results);
        assert!(dot.contains("\"fetch\" [label=\"fetch\\n(Not Executed)\" fillcolor=gray90];"));
        assert!(dot.contains("\"fetch\" -> \"render\" [label=\"(dep not executed)\" style=dashed];"));
    }

    #[test]
    fn share_url_percent_encodes_the_dot_source() {
        let url = share_url("digraph G {\n}\n");
        assert!(url.starts_with("https://dreampuf.github.io/GraphvizOnline/#"));
        assert!(url.contains("digraph%20G"));
        assert!(!url.contains(' '));
    }
}
