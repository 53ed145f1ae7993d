use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation kinds a task can run. Serialized as the processing plugin name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskKind {
  #[serde(rename = "read")]
  Read,
  #[serde(rename = "write")]
  Write,
  #[serde(rename = "ring_writer")]
  RingWriter,
  #[serde(rename = "crop")]
  Crop,
  #[serde(rename = "contrast")]
  Contrast,
  #[serde(rename = "rescale")]
  Rescale,
  #[serde(rename = "fft")]
  Fft,
  #[serde(rename = "ifft")]
  Ifft,
  #[serde(rename = "stack")]
  Stack,
  #[serde(rename = "loop")]
  Loop,
  #[serde(rename = "complex_mult")]
  ComplexMult,
  #[serde(rename = "slice")]
  Slice,
  #[serde(rename = "ring_pattern")]
  RingPattern,
  #[serde(rename = "hough-likelihood")]
  HoughLikelihood,
  #[serde(rename = "candidate-filter")]
  CandidateFilter,
  #[serde(rename = "azimuthal-test")]
  AzimuthalTest,
}

impl TaskKind {
  /// Plugin name the execution engine resolves this kind to.
  pub fn plugin_name(self) -> &'static str {
    match self {
      TaskKind::Read => "read",
      TaskKind::Write => "write",
      TaskKind::RingWriter => "ring_writer",
      TaskKind::Crop => "crop",
      TaskKind::Contrast => "contrast",
      TaskKind::Rescale => "rescale",
      TaskKind::Fft => "fft",
      TaskKind::Ifft => "ifft",
      TaskKind::Stack => "stack",
      TaskKind::Loop => "loop",
      TaskKind::ComplexMult => "complex_mult",
      TaskKind::Slice => "slice",
      TaskKind::RingPattern => "ring_pattern",
      TaskKind::HoughLikelihood => "hough-likelihood",
      TaskKind::CandidateFilter => "candidate-filter",
      TaskKind::AzimuthalTest => "azimuthal-test",
    }
  }

  /// Number of upstream inputs the operation consumes.
  pub fn arity(self) -> usize {
    match self {
      TaskKind::Read | TaskKind::RingPattern => 0,
      TaskKind::ComplexMult | TaskKind::AzimuthalTest => 2,
      _ => 1,
    }
  }
}

impl fmt::Display for TaskKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.plugin_name())
  }
}

/// What a task does with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
  /// Run a processing operation.
  Run(TaskKind),
  /// Duplicate the input so several consumers can read it.
  Copy,
}

impl Operation {
  pub fn arity(self) -> usize {
    match self {
      Operation::Run(kind) => kind.arity(),
      Operation::Copy => 1,
    }
  }
}

/// A scalar task parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
  Int(i64),
  Float(f64),
  Text(String),
}

impl ParamValue {
  /// Numeric value, if any.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      ParamValue::Int(v) => Some(*v as f64),
      ParamValue::Float(v) => Some(*v),
      ParamValue::Text(_) => None,
    }
  }
}

impl From<i64> for ParamValue {
  fn from(value: i64) -> Self {
    ParamValue::Int(value)
  }
}

impl From<u32> for ParamValue {
  fn from(value: u32) -> Self {
    ParamValue::Int(i64::from(value))
  }
}

impl From<f64> for ParamValue {
  fn from(value: f64) -> Self {
    ParamValue::Float(value)
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    ParamValue::Text(value.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(value: String) -> Self {
    ParamValue::Text(value)
  }
}

/// Parameter mapping of a task, ordered by name.
pub type Params = BTreeMap<String, ParamValue>;

/// A named processing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
  pub name: String,
  pub operation: Operation,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub params: Params,
}

impl Task {
  pub fn new(name: impl Into<String>, kind: TaskKind, params: Params) -> Self {
    Self {
      name: name.into(),
      operation: Operation::Run(kind),
      params,
    }
  }

  /// A copy task: no kind of its own, fans its input out to every consumer.
  pub fn copy(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      operation: Operation::Copy,
      params: Params::new(),
    }
  }

  /// Operation kind, `None` for copy tasks.
  pub fn kind(&self) -> Option<TaskKind> {
    match self.operation {
      Operation::Run(kind) => Some(kind),
      Operation::Copy => None,
    }
  }

  pub fn arity(&self) -> usize {
    self.operation.arity()
  }

  pub fn param(&self, name: &str) -> Option<&ParamValue> {
    self.params.get(name)
  }
}
