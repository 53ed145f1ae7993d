use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info};

use crate::branch::Branch;
use crate::catalogue::TaskCatalogue;
use crate::error::PipelineError;
use crate::pipeline::{Edge, Pipeline};
use crate::task::Task;

/// Incrementally assembles a [`Pipeline`] from catalogue branches.
///
/// Every committed edge is checked against the edges already present, so a
/// cycle is reported at the edge that would close it. After any error the
/// builder is in an unspecified state and should be dropped.
#[derive(Debug)]
pub struct PipelineBuilder<'a> {
  catalogue: &'a TaskCatalogue,
  nodes: BTreeMap<String, Task>,
  edges: BTreeSet<Edge>,
  adjacency: HashMap<String, Vec<String>>,
}

impl<'a> PipelineBuilder<'a> {
  pub fn new(catalogue: &'a TaskCatalogue) -> Self {
    Self {
      catalogue,
      nodes: BTreeMap::new(),
      edges: BTreeSet::new(),
      adjacency: HashMap::new(),
    }
  }

  /// Commit a single branch: one edge per consecutive pair of tasks.
  pub fn add_branch(&mut self, branch: &Branch) -> Result<(), PipelineError> {
    for name in branch.tasks() {
      self.add_node(name)?;
    }
    for (from, to) in branch.edges() {
      self.commit_edge(from, to)?;
    }
    Ok(())
  }

  /// Fuse branches at a convergence task.
  ///
  /// The last branch is the target. Every branch's chain is committed, then
  /// the tail of each other branch feeds the target's head. The head must
  /// consume exactly as many inputs as there are producer branches.
  pub fn merge_branch(&mut self, branches: &[&Branch]) -> Result<(), PipelineError> {
    let Some((target, producers)) = branches.split_last() else {
      return Err(PipelineError::InvalidMerge { branches: 0 });
    };
    if producers.is_empty() {
      return Err(PipelineError::InvalidMerge { branches: 1 });
    }

    let head = self.task(target.head())?;
    if head.arity() != producers.len() {
      return Err(PipelineError::ArityMismatch {
        task: head.name.clone(),
        expected: head.arity(),
        actual: producers.len(),
      });
    }

    for branch in branches {
      self.add_branch(branch)?;
    }
    for producer in producers {
      self.commit_edge(producer.tail(), target.head())?;
    }

    debug!(
      target = target.head(),
      producers = ?producers.iter().map(|b| b.tail()).collect::<Vec<_>>(),
      "branches merged"
    );
    Ok(())
  }

  /// Validate input counts of every task and freeze the pipeline.
  pub fn finish(self) -> Result<Pipeline, PipelineError> {
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    for edge in &self.edges {
      *in_degree.entry(edge.to.as_str()).or_default() += 1;
    }

    for task in self.nodes.values() {
      let actual = in_degree.get(task.name.as_str()).copied().unwrap_or(0);
      if actual != task.arity() {
        return Err(PipelineError::ArityMismatch {
          task: task.name.clone(),
          expected: task.arity(),
          actual,
        });
      }
    }

    info!(
      nodes = self.nodes.len(),
      edges = self.edges.len(),
      "pipeline assembled"
    );

    Ok(Pipeline {
      nodes: self.nodes,
      edges: self.edges,
    })
  }

  fn task(&self, name: &str) -> Result<&'a Task, PipelineError> {
    self
      .catalogue
      .get(name)
      .ok_or_else(|| PipelineError::UnknownTaskReference {
        name: name.to_string(),
      })
  }

  fn add_node(&mut self, name: &str) -> Result<(), PipelineError> {
    if !self.nodes.contains_key(name) {
      let task = self.task(name)?.clone();
      self.nodes.insert(name.to_string(), task);
    }
    Ok(())
  }

  fn commit_edge(&mut self, from: &str, to: &str) -> Result<(), PipelineError> {
    let edge = Edge::new(from, to);
    if self.edges.contains(&edge) {
      return Ok(());
    }
    if self.reaches(to, from) {
      return Err(PipelineError::CyclicGraph {
        from: from.to_string(),
        to: to.to_string(),
      });
    }

    self
      .adjacency
      .entry(from.to_string())
      .or_default()
      .push(to.to_string());
    self.edges.insert(edge);
    Ok(())
  }

  /// Whether `target` is reachable from `start` (a task reaches itself).
  fn reaches(&self, start: &str, target: &str) -> bool {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
      if current == target {
        return true;
      }
      if visited.insert(current) {
        if let Some(next) = self.adjacency.get(current) {
          stack.extend(next.iter().map(|s| s.as_str()));
        }
      }
    }
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::{Params, TaskKind};

  fn catalogue() -> TaskCatalogue {
    let mut catalogue = TaskCatalogue::new();
    for (name, kind) in [
      ("read", TaskKind::Read),
      ("crop", TaskKind::Crop),
      ("fft", TaskKind::Fft),
      ("pattern", TaskKind::RingPattern),
      ("pattern_fft", TaskKind::Fft),
      ("mult", TaskKind::ComplexMult),
      ("ifft", TaskKind::Ifft),
      ("test", TaskKind::AzimuthalTest),
      ("write", TaskKind::Write),
    ] {
      catalogue.add_task(name, kind, Params::new()).unwrap();
    }
    catalogue.add_copy_task("copy").unwrap();
    catalogue
  }

  #[test]
  fn test_add_branch_links_consecutive_tasks() {
    let catalogue = catalogue();
    let mut builder = PipelineBuilder::new(&catalogue);
    builder
      .add_branch(&catalogue.branch(&["read", "crop", "write"]).unwrap())
      .unwrap();

    let pipeline = builder.finish().unwrap();
    assert_eq!(pipeline.nodes.len(), 3);
    assert!(pipeline.has_edge("read", "crop"));
    assert!(pipeline.has_edge("crop", "write"));
    assert!(!pipeline.contains("fft"));
  }

  #[test]
  fn test_merge_feeds_target_head() {
    let catalogue = catalogue();
    let b1 = catalogue.branch(&["read", "fft"]).unwrap();
    let b2 = catalogue.branch(&["pattern", "pattern_fft"]).unwrap();
    let b3 = catalogue.branch(&["mult", "ifft", "write"]).unwrap();

    let mut builder = PipelineBuilder::new(&catalogue);
    builder.merge_branch(&[&b1, &b2, &b3]).unwrap();
    let pipeline = builder.finish().unwrap();

    assert!(pipeline.has_edge("fft", "mult"));
    assert!(pipeline.has_edge("pattern_fft", "mult"));
    assert!(pipeline.has_edge("mult", "ifft"));
    assert_eq!(pipeline.edges.len(), 6);

    let graph = pipeline.graph();
    assert!(graph.is_join_point("mult"));
    assert_eq!(graph.sinks(), &["write".to_string()]);
  }

  #[test]
  fn test_recommitted_branch_does_not_duplicate_edges() {
    let catalogue = catalogue();
    let b1 = catalogue.branch(&["read", "copy", "fft"]).unwrap();
    let b2 = catalogue.branch(&["pattern", "pattern_fft"]).unwrap();
    let b3 = catalogue.branch(&["copy"]).unwrap();
    let b4 = catalogue.branch(&["mult", "ifft"]).unwrap();
    let b5 = catalogue.branch(&["test", "write"]).unwrap();

    let mut builder = PipelineBuilder::new(&catalogue);
    builder.merge_branch(&[&b1, &b2, &b4]).unwrap();
    builder.merge_branch(&[&b3, &b4, &b5]).unwrap();
    let pipeline = builder.finish().unwrap();

    let graph = pipeline.graph();
    assert_eq!(graph.upstream("test"), &["copy".to_string(), "ifft".to_string()]);
    assert_eq!(graph.downstream("copy"), &["fft".to_string(), "test".to_string()]);
    assert_eq!(graph.upstream("ifft"), &["mult".to_string()]);
  }

  #[test]
  fn test_merge_arity_mismatch() {
    let catalogue = catalogue();
    let b1 = catalogue.branch(&["read", "fft"]).unwrap();
    let b2 = catalogue.branch(&["crop", "ifft", "write"]).unwrap();

    let mut builder = PipelineBuilder::new(&catalogue);
    builder.merge_branch(&[&b1, &b2]).unwrap();

    let b3 = catalogue.branch(&["pattern"]).unwrap();
    let b4 = catalogue.branch(&["mult", "write"]).unwrap();
    let mut builder = PipelineBuilder::new(&catalogue);
    assert_eq!(
      builder.merge_branch(&[&b3, &b4]),
      Err(PipelineError::ArityMismatch {
        task: "mult".to_string(),
        expected: 2,
        actual: 1,
      })
    );
  }

  #[test]
  fn test_finish_rejects_unfed_convergence_task() {
    let catalogue = catalogue();
    let mut builder = PipelineBuilder::new(&catalogue);
    builder
      .add_branch(&catalogue.branch(&["read", "mult", "write"]).unwrap())
      .unwrap();

    assert_eq!(
      builder.finish(),
      Err(PipelineError::ArityMismatch {
        task: "mult".to_string(),
        expected: 2,
        actual: 1,
      })
    );
  }

  #[test]
  fn test_finish_rejects_fed_source() {
    let catalogue = catalogue();
    let mut builder = PipelineBuilder::new(&catalogue);
    builder
      .add_branch(&catalogue.branch(&["read", "fft", "pattern"]).unwrap())
      .unwrap();

    assert_eq!(
      builder.finish(),
      Err(PipelineError::ArityMismatch {
        task: "pattern".to_string(),
        expected: 0,
        actual: 1,
      })
    );
  }

  #[test]
  fn test_cycle_rejected() {
    let catalogue = catalogue();
    let mut builder = PipelineBuilder::new(&catalogue);
    builder
      .add_branch(&catalogue.branch(&["crop", "fft", "ifft"]).unwrap())
      .unwrap();

    let result = builder.add_branch(&catalogue.branch(&["ifft", "crop"]).unwrap());
    assert_eq!(
      result,
      Err(PipelineError::CyclicGraph {
        from: "ifft".to_string(),
        to: "crop".to_string(),
      })
    );
  }

  #[test]
  fn test_merge_edge_closing_cycle_rejected() {
    let catalogue = catalogue();
    let mut builder = PipelineBuilder::new(&catalogue);
    builder
      .add_branch(&catalogue.branch(&["crop", "fft", "ifft"]).unwrap())
      .unwrap();

    // Neither branch chain has an edge; only tail(ifft) -> head(crop) does.
    let producer = catalogue.branch(&["ifft"]).unwrap();
    let target = catalogue.branch(&["crop"]).unwrap();
    assert_eq!(
      builder.merge_branch(&[&producer, &target]),
      Err(PipelineError::CyclicGraph {
        from: "ifft".to_string(),
        to: "crop".to_string(),
      })
    );

    let pipeline = builder.finish();
    assert!(matches!(
      pipeline,
      Err(PipelineError::ArityMismatch { ref task, .. }) if task == "crop"
    ));
  }

  #[test]
  fn test_self_loop_rejected() {
    let catalogue = catalogue();
    let mut builder = PipelineBuilder::new(&catalogue);
    let result = builder.add_branch(&catalogue.branch(&["crop", "crop"]).unwrap());
    assert!(matches!(result, Err(PipelineError::CyclicGraph { .. })));
  }

  #[test]
  fn test_merge_needs_two_branches() {
    let catalogue = catalogue();
    let b1 = catalogue.branch(&["read"]).unwrap();
    let mut builder = PipelineBuilder::new(&catalogue);
    assert_eq!(
      builder.merge_branch(&[&b1]),
      Err(PipelineError::InvalidMerge { branches: 1 })
    );
    assert_eq!(
      builder.merge_branch(&[]),
      Err(PipelineError::InvalidMerge { branches: 0 })
    );
  }

  #[test]
  fn test_branch_from_foreign_catalogue() {
    let catalogue = catalogue();
    let mut other = TaskCatalogue::new();
    other.add_task("stranger", TaskKind::Crop, Params::new()).unwrap();
    let branch = other.branch(&["stranger"]).unwrap();

    let mut builder = PipelineBuilder::new(&catalogue);
    assert_eq!(
      builder.add_branch(&branch),
      Err(PipelineError::UnknownTaskReference {
        name: "stranger".to_string()
      })
    );
  }
}
