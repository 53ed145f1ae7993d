use serde::{Deserialize, Serialize};

/// Flags handed to the execution engine together with the assembled graph.
///
/// Absent keys take their documented defaults: `profiling = false`,
/// `deviceCPU = false`, `schedfixed = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionFlags {
  #[serde(default)]
  pub profiling: bool,

  /// Restrict execution to CPU devices.
  #[serde(rename = "deviceCPU", default)]
  pub device_cpu: bool,

  /// Use a fixed (static) task schedule.
  #[serde(rename = "schedfixed", default = "default_sched_fixed")]
  pub sched_fixed: bool,
}

pub(crate) fn default_sched_fixed() -> bool {
  true
}

impl Default for ExecutionFlags {
  fn default() -> Self {
    Self {
      profiling: false,
      device_cpu: false,
      sched_fixed: default_sched_fixed(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_when_keys_absent() {
    let flags: ExecutionFlags = serde_json::from_str("{}").unwrap();
    assert_eq!(flags, ExecutionFlags::default());
    assert!(!flags.profiling);
    assert!(!flags.device_cpu);
    assert!(flags.sched_fixed);
  }

  #[test]
  fn test_explicit_false_sched_fixed_is_kept() {
    let flags: ExecutionFlags =
      serde_json::from_str(r#"{"profiling": true, "deviceCPU": true, "schedfixed": false}"#)
        .unwrap();
    assert!(flags.profiling);
    assert!(flags.device_cpu);
    assert!(!flags.sched_fixed);
  }

  #[test]
  fn test_misspelled_key_rejected() {
    let result: Result<ExecutionFlags, _> = serde_json::from_str(r#"{"schedFixed": false}"#);
    assert!(result.is_err());
  }
}
