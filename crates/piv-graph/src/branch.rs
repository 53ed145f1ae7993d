/// An ordered chain of catalogue task names.
///
/// A branch is a deferred edge list: it is only committed to a graph through
/// [`PipelineBuilder`](crate::PipelineBuilder). Branches are created by
/// [`TaskCatalogue::branch`](crate::TaskCatalogue::branch), which guarantees
/// they are non-empty and reference existing tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
  tasks: Vec<String>,
}

impl Branch {
  pub(crate) fn new(tasks: Vec<String>) -> Self {
    debug_assert!(!tasks.is_empty());
    Self { tasks }
  }

  /// First task of the chain.
  pub fn head(&self) -> &str {
    &self.tasks[0]
  }

  /// Last task of the chain.
  pub fn tail(&self) -> &str {
    &self.tasks[self.tasks.len() - 1]
  }

  pub fn tasks(&self) -> &[String] {
    &self.tasks
  }

  /// Producer -> consumer pairs of consecutive tasks.
  pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .tasks
      .windows(2)
      .map(|pair| (pair[0].as_str(), pair[1].as_str()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn branch(names: &[&str]) -> Branch {
    Branch::new(names.iter().map(|n| n.to_string()).collect())
  }

  #[test]
  fn test_head_tail_edges() {
    let b = branch(&["ring_convolution", "ifft", "write"]);
    assert_eq!(b.head(), "ring_convolution");
    assert_eq!(b.tail(), "write");
    assert_eq!(
      b.edges().collect::<Vec<_>>(),
      vec![("ring_convolution", "ifft"), ("ifft", "write")]
    );
  }

  #[test]
  fn test_single_task_branch() {
    let b = branch(&["bc_image"]);
    assert_eq!(b.head(), "bc_image");
    assert_eq!(b.tail(), "bc_image");
    assert_eq!(b.edges().count(), 0);
  }
}
