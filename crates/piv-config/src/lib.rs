//! PIV Config
//!
//! Serializable configuration types for a ring-detection job. A config file
//! carries two sections:
//! - `parms`: the Parameter Set consumed when the task catalogue is built
//! - `config`: execution flags and the topology selector
//!
//! Everything is validated once, at load time. A malformed or missing config
//! file is an error; there is no fallback to a built-in default.

mod error;
mod file;
mod flags;
mod params;
mod selector;

pub use error::ConfigError;
pub use file::{JobConfig, PivConfig};
pub use flags::ExecutionFlags;
pub use params::{ContrastCoefficients, PivParams};
pub use selector::GraphSelector;
