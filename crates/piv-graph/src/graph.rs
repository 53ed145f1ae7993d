use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::pipeline::Edge;
use crate::task::Task;

/// Graph structure for traversal and analysis.
#[derive(Debug, Clone)]
pub struct Graph {
  /// Adjacency list: task -> downstream tasks.
  adjacency: BTreeMap<String, Vec<String>>,
  /// Reverse adjacency: task -> upstream tasks.
  reverse_adjacency: BTreeMap<String, Vec<String>>,
  /// Tasks with no incoming edges.
  entry_points: Vec<String>,
  /// Tasks with no outgoing edges.
  sinks: Vec<String>,
  /// Tasks with multiple incoming edges (convergence points).
  join_points: BTreeSet<String>,
}

impl Graph {
  /// Build a graph from nodes and edges.
  pub fn new(nodes: &BTreeMap<String, Task>, edges: &BTreeSet<Edge>) -> Self {
    let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut reverse_adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for name in nodes.keys() {
      adjacency.entry(name.clone()).or_default();
      reverse_adjacency.entry(name.clone()).or_default();
    }

    for Edge { from, to } in edges {
      adjacency.entry(from.clone()).or_default().push(to.clone());
      reverse_adjacency
        .entry(to.clone())
        .or_default()
        .push(from.clone());
    }

    let entry_points: Vec<String> = reverse_adjacency
      .iter()
      .filter(|(_, incoming)| incoming.is_empty())
      .map(|(name, _)| name.clone())
      .collect();

    let sinks: Vec<String> = adjacency
      .iter()
      .filter(|(_, outgoing)| outgoing.is_empty())
      .map(|(name, _)| name.clone())
      .collect();

    let join_points: BTreeSet<String> = reverse_adjacency
      .iter()
      .filter(|(_, incoming)| incoming.len() > 1)
      .map(|(name, _)| name.clone())
      .collect();

    Self {
      adjacency,
      reverse_adjacency,
      entry_points,
      sinks,
      join_points,
    }
  }

  /// Tasks with no incoming edges.
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Tasks with no outgoing edges.
  pub fn sinks(&self) -> &[String] {
    &self.sinks
  }

  pub fn downstream(&self, name: &str) -> &[String] {
    self
      .adjacency
      .get(name)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  pub fn upstream(&self, name: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(name)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Check if a task has multiple incoming edges.
  pub fn is_join_point(&self, name: &str) -> bool {
    self.join_points.contains(name)
  }

  pub fn join_points(&self) -> &BTreeSet<String> {
    &self.join_points
  }

  /// Every task `name` transitively depends on.
  pub fn ancestors(&self, name: &str) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&str> = self.upstream(name).iter().map(|s| s.as_str()).collect();
    while let Some(current) = stack.pop() {
      if seen.insert(current.to_string()) {
        stack.extend(self.upstream(current).iter().map(|s| s.as_str()));
      }
    }
    seen
  }

  /// Tasks in dependency order, ties broken by name.
  ///
  /// Returns `None` if the graph contains a cycle.
  pub fn topological_order(&self) -> Option<Vec<String>> {
    let mut in_degree: HashMap<&str, usize> = self
      .reverse_adjacency
      .iter()
      .map(|(name, incoming)| (name.as_str(), incoming.len()))
      .collect();

    let mut ready: BTreeSet<&str> = in_degree
      .iter()
      .filter(|(_, degree)| **degree == 0)
      .map(|(name, _)| *name)
      .collect();

    let mut order = Vec::with_capacity(self.adjacency.len());
    while let Some(name) = ready.pop_first() {
      order.push(name.to_string());
      for next in self.downstream(name) {
        if let Some(degree) = in_degree.get_mut(next.as_str()) {
          *degree -= 1;
          if *degree == 0 {
            ready.insert(next.as_str());
          }
        }
      }
    }

    (order.len() == self.adjacency.len()).then_some(order)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::{Params, TaskKind};

  fn nodes(names: &[&str]) -> BTreeMap<String, Task> {
    names
      .iter()
      .map(|n| (n.to_string(), Task::new(*n, TaskKind::Crop, Params::new())))
      .collect()
  }

  fn edges(pairs: &[(&str, &str)]) -> BTreeSet<Edge> {
    pairs.iter().map(|(a, b)| Edge::new(*a, *b)).collect()
  }

  #[test]
  fn test_entry_points_sinks_and_join_points() {
    let graph = Graph::new(
      &nodes(&["a", "b", "join", "out"]),
      &edges(&[("a", "join"), ("b", "join"), ("join", "out")]),
    );

    assert_eq!(graph.entry_points(), &["a".to_string(), "b".to_string()]);
    assert_eq!(graph.sinks(), &["out".to_string()]);
    assert!(graph.is_join_point("join"));
    assert!(!graph.is_join_point("out"));
    assert_eq!(graph.upstream("join"), &["a".to_string(), "b".to_string()]);
    assert_eq!(graph.downstream("join"), &["out".to_string()]);
    assert!(graph.upstream("missing").is_empty());
  }

  #[test]
  fn test_ancestors() {
    let graph = Graph::new(
      &nodes(&["a", "b", "c", "d"]),
      &edges(&[("a", "b"), ("b", "d"), ("c", "d")]),
    );
    let ancestors: Vec<String> = graph.ancestors("d").into_iter().collect();
    assert_eq!(ancestors, vec!["a", "b", "c"]);
    assert!(graph.ancestors("a").is_empty());
  }

  #[test]
  fn test_topological_order() {
    let graph = Graph::new(
      &nodes(&["read", "crop", "pattern", "mult"]),
      &edges(&[("read", "crop"), ("crop", "mult"), ("pattern", "mult")]),
    );
    assert_eq!(
      graph.topological_order().unwrap(),
      vec!["pattern", "read", "crop", "mult"]
    );
  }

  #[test]
  fn test_topological_order_detects_cycle() {
    let graph = Graph::new(&nodes(&["a", "b"]), &edges(&[("a", "b"), ("b", "a")]));
    assert!(graph.topological_order().is_none());
  }
}
