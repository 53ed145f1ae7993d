use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw topology selector as written in a config file or on the command line.
///
/// Either a numeric flag (`3`) or a variant name (`"hough"`). Whether the
/// value names a known topology is decided when the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphSelector {
  Index(i64),
  Name(String),
}

impl FromStr for GraphSelector {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    Ok(match s.parse::<i64>() {
      Ok(index) => GraphSelector::Index(index),
      Err(_) => GraphSelector::Name(s.to_string()),
    })
  }
}

impl fmt::Display for GraphSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GraphSelector::Index(index) => write!(f, "{}", index),
      GraphSelector::Name(name) => write!(f, "{:?}", name),
    }
  }
}
