use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The Parameter Set of a ring-detection job.
///
/// Geometry is given in the frame's own pixel units. Stages operating on
/// the rescaled frame divide by `scale` when the catalogue is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PivParams {
  /// Input frames, passed verbatim to the reader.
  pub input_path: String,
  /// Destination of raw image output (hough, likelihood and contrast graphs).
  pub output_path: String,
  /// Destination of detected rings (candidate and azimuthal graphs).
  pub ring_output_path: String,

  pub xshift: f64,
  pub yshift: f64,
  pub width: f64,
  pub height: f64,

  /// Downscale factor applied before the FFT stages.
  pub scale: f64,

  pub ring_start: f64,
  pub ring_end: f64,
  pub ring_step: f64,
  pub ring_thickness: f64,
  pub ring_method: i64,
  /// Number of ring templates stacked for the convolution.
  pub ring_number: u32,

  /// Number of input frames the ring stack is looped over.
  pub number: u32,

  pub likelihoodmask: u32,
  pub likelihoodmaskinner: u32,

  pub candi_threshold: f64,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub contrast: Option<ContrastCoefficients>,
}

/// Coefficients of the contrast stretch. Optional; the stage runs with its
/// own defaults when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContrastCoefficients {
  pub c1: f64,
  pub c2: f64,
  pub c3: f64,
  pub c4: f64,
}

impl PivParams {
  /// Check value ranges that serde cannot express.
  pub fn validate(&self) -> Result<(), ConfigError> {
    positive("scale", self.scale)?;
    positive("width", self.width)?;
    positive("height", self.height)?;
    positive("ring_step", self.ring_step)?;
    positive("ring_thickness", self.ring_thickness)?;

    if self.ring_start.is_nan() || self.ring_start < 0.0 {
      return Err(invalid("ring_start", format!("must be >= 0, got {}", self.ring_start)));
    }
    if self.ring_end.is_nan() || self.ring_end < self.ring_start {
      return Err(invalid(
        "ring_end",
        format!(
          "must be >= ring_start ({}), got {}",
          self.ring_start, self.ring_end
        ),
      ));
    }
    if self.ring_number == 0 {
      return Err(invalid("ring_number", "must be > 0".to_string()));
    }
    if self.number == 0 {
      return Err(invalid("number", "must be > 0".to_string()));
    }
    if self.likelihoodmaskinner >= self.likelihoodmask {
      return Err(invalid(
        "likelihoodmaskinner",
        format!(
          "must be smaller than likelihoodmask ({}), got {}",
          self.likelihoodmask, self.likelihoodmaskinner
        ),
      ));
    }

    Ok(())
  }
}

// NaN fails the comparison and is rejected too.
fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
  if value > 0.0 && value.is_finite() {
    Ok(())
  } else {
    Err(invalid(field, format!("must be a positive number, got {}", value)))
  }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
  ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> PivParams {
    PivParams {
      input_path: "frames/*.tif".to_string(),
      output_path: "out/hough-%05i.tif".to_string(),
      ring_output_path: "out/rings.txt".to_string(),
      xshift: 0.0,
      yshift: 0.0,
      width: 256.0,
      height: 256.0,
      scale: 2.0,
      ring_start: 10.0,
      ring_end: 50.0,
      ring_step: 5.0,
      ring_thickness: 2.0,
      ring_method: 0,
      ring_number: 9,
      number: 1,
      likelihoodmask: 7,
      likelihoodmaskinner: 2,
      candi_threshold: 0.5,
      contrast: None,
    }
  }

  #[test]
  fn test_valid_params() {
    assert!(sample().validate().is_ok());
  }

  #[test]
  fn test_rejects_non_positive_scale() {
    let mut params = sample();
    params.scale = 0.0;
    assert!(matches!(
      params.validate(),
      Err(ConfigError::Invalid { field: "scale", .. })
    ));

    params.scale = f64::NAN;
    assert!(matches!(
      params.validate(),
      Err(ConfigError::Invalid { field: "scale", .. })
    ));
  }

  #[test]
  fn test_rejects_inverted_ring_range() {
    let mut params = sample();
    params.ring_end = 5.0;
    assert!(matches!(
      params.validate(),
      Err(ConfigError::Invalid { field: "ring_end", .. })
    ));
  }

  #[test]
  fn test_rejects_inner_mask_not_smaller() {
    let mut params = sample();
    params.likelihoodmaskinner = params.likelihoodmask;
    assert!(matches!(
      params.validate(),
      Err(ConfigError::Invalid {
        field: "likelihoodmaskinner",
        ..
      })
    ));
  }

  #[test]
  fn test_unknown_field_is_rejected() {
    let mut value = serde_json::to_value(sample()).unwrap();
    value["ring_strat"] = serde_json::json!(10);
    let result: Result<PivParams, _> = serde_json::from_value(value);
    assert!(result.is_err());
  }
}
