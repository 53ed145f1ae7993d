//! PIV Graph
//!
//! Construction model for processing pipelines:
//! - a [`TaskCatalogue`] of named, parameterised tasks
//! - [`Branch`]es, ordered chains of catalogue tasks that commit nothing on
//!   their own
//! - a [`PipelineBuilder`] that appends and merges branches into a DAG,
//!   rejecting cycles and convergence tasks fed by the wrong number of inputs
//! - the finished, immutable [`Pipeline`] and its traversal [`Graph`]
//!
//! All failures are construction-time errors; nothing here executes a task.

mod branch;
mod builder;
mod catalogue;
mod error;
mod graph;
mod pipeline;
mod task;

pub use branch::Branch;
pub use builder::PipelineBuilder;
pub use catalogue::TaskCatalogue;
pub use error::PipelineError;
pub use graph::Graph;
pub use pipeline::{Edge, Pipeline};
pub use task::{Operation, ParamValue, Params, Task, TaskKind};
