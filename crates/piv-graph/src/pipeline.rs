use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::task::Task;

/// A producer -> consumer connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
  pub from: String,
  pub to: String,
}

impl Edge {
  pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
    }
  }
}

/// An assembled, validated pipeline ready to be handed to an engine.
///
/// Only tasks that appear in a committed branch are nodes. Two pipelines
/// compare equal when they have the same nodes (with the same parameters)
/// and the same edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
  pub nodes: BTreeMap<String, Task>,
  pub edges: BTreeSet<Edge>,
}

impl Pipeline {
  /// Build the graph structure for traversal.
  pub fn graph(&self) -> Graph {
    Graph::new(&self.nodes, &self.edges)
  }

  pub fn get_task(&self, name: &str) -> Option<&Task> {
    self.nodes.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.nodes.contains_key(name)
  }

  pub fn has_edge(&self, from: &str, to: &str) -> bool {
    self.edges.contains(&Edge::new(from, to))
  }
}
