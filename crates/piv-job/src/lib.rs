//! PIV Job
//!
//! Assembles the ring-detection pipeline for particle-image-velocimetry
//! frames and hands it to an execution engine:
//! - [`setup_tasks`] registers every stage, deriving parameters from the
//!   Parameter Set
//! - [`Topology`] selects one of five graph shapes built from that catalogue
//! - [`Job`] ties the catalogue, the execution flags and an [`Engine`]
//!   together
//!
//! Graph construction is synchronous and completes before the engine is
//! called; a failed construction never reaches the engine.

mod engine;
mod error;
mod job;
mod tasks;
mod topology;

pub use engine::{Engine, ExecutionReport, PlanEngine, PlannedStage};
pub use error::{EngineError, JobError};
pub use job::Job;
pub use tasks::setup_tasks;
pub use topology::Topology;
