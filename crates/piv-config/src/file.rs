use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flags::{ExecutionFlags, default_sched_fixed};
use crate::params::PivParams;
use crate::selector::GraphSelector;

/// The `config` section: execution flags plus the topology to build.
///
/// Keys are matched exactly; a misspelled flag is a parse error rather than
/// a silently applied default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
  #[serde(default)]
  pub profiling: bool,
  #[serde(rename = "deviceCPU", default)]
  pub device_cpu: bool,
  #[serde(rename = "schedfixed", default = "default_sched_fixed")]
  pub sched_fixed: bool,
  /// May be left out when the selector is supplied elsewhere (CLI).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub graph: Option<GraphSelector>,
}

impl JobConfig {
  pub fn flags(&self) -> ExecutionFlags {
    ExecutionFlags {
      profiling: self.profiling,
      device_cpu: self.device_cpu,
      sched_fixed: self.sched_fixed,
    }
  }
}

/// A complete job configuration document.
///
/// ```json
/// {
///   "parms": { "scale": 2, "ring_start": 10, ... },
///   "config": { "profiling": false, "graph": "hough" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivConfig {
  pub parms: PivParams,
  pub config: JobConfig,
}

impl PivConfig {
  /// Parse and validate a config document.
  pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
    let config: PivConfig = serde_json::from_str(content)?;
    config.parms.validate()?;
    Ok(config)
  }

  /// Read, parse and validate a config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&content)
  }
}
