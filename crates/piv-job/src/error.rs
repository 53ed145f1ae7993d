use thiserror::Error;

use piv_config::ConfigError;
use piv_graph::PipelineError;

/// Errors reported by an execution engine.
#[derive(Debug, Error)]
pub enum EngineError {
  /// The engine refused the pipeline it was given.
  #[error("pipeline rejected: {0}")]
  Rejected(String),

  /// Execution started but did not complete.
  #[error("execution failed: {0}")]
  Failed(String),
}

/// Errors that can occur while setting up or running a job.
#[derive(Debug, Error)]
pub enum JobError {
  #[error("invalid configuration: {0}")]
  Config(#[from] ConfigError),

  #[error("pipeline construction failed: {0}")]
  Pipeline(#[from] PipelineError),

  #[error("engine error: {0}")]
  Engine(#[from] EngineError),
}
