use std::collections::BTreeMap;

use tracing::debug;

use crate::branch::Branch;
use crate::error::PipelineError;
use crate::task::{Params, Task, TaskKind};

/// The named tasks of one job. Tasks are never removed or replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCatalogue {
  tasks: BTreeMap<String, Task>,
}

impl TaskCatalogue {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a task running `kind` with the given parameters.
  pub fn add_task(
    &mut self,
    name: impl Into<String>,
    kind: TaskKind,
    params: Params,
  ) -> Result<(), PipelineError> {
    self.insert(Task::new(name, kind, params))
  }

  /// Register a copy task, a fan-out point for its single input.
  pub fn add_copy_task(&mut self, name: impl Into<String>) -> Result<(), PipelineError> {
    self.insert(Task::copy(name))
  }

  fn insert(&mut self, task: Task) -> Result<(), PipelineError> {
    if self.tasks.contains_key(&task.name) {
      return Err(PipelineError::DuplicateTaskName { name: task.name });
    }
    debug!(task = %task.name, operation = ?task.operation, "task registered");
    self.tasks.insert(task.name.clone(), task);
    Ok(())
  }

  /// Chain existing tasks into a branch. Nothing is committed to any graph.
  pub fn branch(&self, names: &[&str]) -> Result<Branch, PipelineError> {
    if names.is_empty() {
      return Err(PipelineError::EmptyBranch);
    }
    if let Some(missing) = names.iter().find(|name| !self.tasks.contains_key(**name)) {
      return Err(PipelineError::UnknownTaskReference {
        name: missing.to_string(),
      });
    }
    Ok(Branch::new(names.iter().map(|n| n.to_string()).collect()))
  }

  pub fn get(&self, name: &str) -> Option<&Task> {
    self.tasks.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.tasks.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }
}
