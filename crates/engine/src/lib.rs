//! `engine` crate — dependency-graph construction, cycle detection, and the
//! concurrent fan-out/fan-in scheduler.

pub mod error;
pub mod graph;
pub mod scheduler;

pub use error::EngineError;
pub use graph::DependencyGraph;
pub use scheduler::{ExecutionRecord, Scheduler};
