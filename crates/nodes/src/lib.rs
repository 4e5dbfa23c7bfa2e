//! `nodes` crate — the `DagNode` contract and the data model around it.
//!
//! Every unit of work the engine schedules implements [`DagNode`]: a unique
//! name, a list of dependency names, and an async `evaluate`.  The engine
//! crate dispatches execution through this trait object and stays ignorant
//! of what a node actually computes.

pub mod context;
pub mod error;
pub mod mock;
pub mod result;
pub mod traits;
pub mod wrapper;

pub use context::DagContext;
pub use error::NodeError;
pub use result::DataWrapper;
pub use traits::{default_calc, BoxFuture, CalcFn, DagNode};
pub use wrapper::{NodeGroup, NodeWrapper};
