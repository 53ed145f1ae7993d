use thiserror::Error;

/// Errors raised while assembling a pipeline. All of them abort assembly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
  /// A task id is registered twice in the catalogue.
  #[error("duplicate task name: {name}")]
  DuplicateTaskName { name: String },

  /// A branch names a task the catalogue does not contain.
  #[error("unknown task reference: {name}")]
  UnknownTaskReference { name: String },

  /// Committing `from -> to` would close a cycle.
  #[error("edge {from} -> {to} would create a cycle")]
  CyclicGraph { from: String, to: String },

  /// A task receives a different number of inputs than it consumes.
  #[error("task '{task}' expects {expected} input(s), got {actual}")]
  ArityMismatch {
    task: String,
    expected: usize,
    actual: usize,
  },

  /// The topology selector names no known variant.
  #[error("unknown topology selector: {selector}")]
  UnknownTopologySelector { selector: String },

  /// A branch was created without any task.
  #[error("branch must reference at least one task")]
  EmptyBranch,

  /// A merge needs producer branches and a target branch.
  #[error("merge needs at least 2 branches, got {branches}")]
  InvalidMerge { branches: usize },
}
