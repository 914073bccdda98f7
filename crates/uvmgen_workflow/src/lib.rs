//! Workflow status engine.
//!
//! Derives, from a snapshot alone, which units are BLOCKED, READY or
//! COMPLETE, and summarizes the result as a dashboard [`WorkflowReport`].
//! The prerequisite relation lives in [`graph`] as a petgraph DAG.

#![warn(missing_docs)]

pub mod engine;
pub mod graph;
pub mod report;
pub mod status;
pub mod unit;

pub use engine::{compute_module_statuses, ready_to_generate, ModuleStatuses};
pub use graph::WorkflowGraph;
pub use report::{WorkflowReport, ALL_COMPLETE};
pub use status::{ModuleStatus, Status};
pub use unit::WorkflowUnit;
