use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a job configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("failed to read config file {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The document is not valid JSON or is missing required keys.
  #[error("failed to parse config: {0}")]
  Parse(#[from] serde_json::Error),

  /// A parameter is present but out of range.
  #[error("invalid parameter '{field}': {reason}")]
  Invalid { field: &'static str, reason: String },
}
