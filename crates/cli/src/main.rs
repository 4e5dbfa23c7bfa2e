//! `dagrun` CLI entry-point.
//!
//! Available sub-commands:
//! - `demo` — run the built-in sample task group and print the report.

use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use engine::Scheduler;
use nodes::{CalcFn, DagContext, NodeGroup};

mod tasks;

#[derive(Parser)]
#[command(name = "dagrun", about = "Generic DAG task executor", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the built-in demo task group.
    Demo {
        /// Make the weak `fetch_orders` node fail to show failure tolerance.
        #[arg(long)]
        inject_failure: bool,
        /// Dump the collected trace as pretty JSON after the run.
        #[arg(long)]
        trace: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Demo {
            inject_failure,
            trace,
        } => demo(inject_failure, trace).await,
    }
}

async fn demo(inject_failure: bool, dump_trace: bool) -> anyhow::Result<()> {
    let mut group = NodeGroup::with_capacity(3);
    group.push(Arc::new(tasks::RenderSummary), true);
    group.push(Arc::new(tasks::FetchProfile), false);
    group.push(
        Arc::new(tasks::FetchOrders {
            fail: inject_failure,
        }),
        false,
    );

    let mut scheduler = Scheduler::build(DagContext::new(), group, demo_calc())?;
    anyhow::ensure!(
        scheduler.circular_check(),
        "circular dependency check failed"
    );

    let cost = scheduler.run().await?;
    info!(
        run_id = %scheduler.run_id(),
        cost_ms = cost.as_millis() as u64,
        "demo dag finished"
    );

    for nw in scheduler.group().iter() {
        match scheduler.execution_result(nw.name()) {
            Some(record) => {
                let status = match &record.error {
                    None => "ok".to_string(),
                    Some(err) => format!("error ({err})"),
                };
                println!(
                    "  {:<16} {status:<10} {}ms",
                    nw.name(),
                    record.duration().num_milliseconds()
                );
            }
            None => println!("  {:<16} not executed", nw.name()),
        }
    }

    let dot = report::dot_graph(scheduler.group(), scheduler.execution_results());
    println!("graph: {}", report::share_url(&dot));

    if dump_trace {
        println!("trace: {}", scheduler.context().trace.to_pretty_json());
    }

    Ok(())
}

/// Demo calc function: time each node, log the outcome to the shared trace,
/// and interpret the strong/weak flag — a strong node's failure surfaces in
/// its record, a weak node's failure is tolerated.
fn demo_calc() -> CalcFn<DagContext> {
    Arc::new(|ctx, nw| {
        Box::pin(async move {
            let started = Instant::now();
            let result = nw.node().evaluate(ctx.as_ref()).await.into_result();
            let cost_ms = started.elapsed().as_millis();

            match result {
                Ok(_) => {
                    ctx.trace.ok(format!("[{cost_ms}ms][{}] pack ok", nw.name()));
                    Ok(())
                }
                Err(err) if nw.is_strong() => {
                    ctx.trace
                        .error(format!("[{cost_ms}ms][strong][{}] pack err", nw.name()));
                    Err(err)
                }
                Err(_) => {
                    ctx.trace
                        .warn(format!("[{cost_ms}ms][weak][{}] pack err, tolerated", nw.name()));
                    Ok(())
                }
            }
        })
    })
}
