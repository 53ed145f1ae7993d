use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use piv_config::GraphSelector;
use piv_graph::{Pipeline, PipelineBuilder, PipelineError, TaskCatalogue};

/// The graph shapes a job can run, all drawn from the same catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
  /// Full detection with azimuthal verification of each candidate.
  Azimu,
  /// Candidate rings without the azimuthal test.
  Candidate,
  /// Raw hough likelihood images.
  Likelihood,
  /// Raw convolution (hough space) images.
  Hough,
  /// Preprocessed frames only, no ring machinery.
  Contrast,
}

impl Topology {
  pub const ALL: [Topology; 5] = [
    Topology::Azimu,
    Topology::Candidate,
    Topology::Likelihood,
    Topology::Hough,
    Topology::Contrast,
  ];

  /// Numeric selector flag.
  pub fn index(self) -> i64 {
    match self {
      Topology::Azimu => 0,
      Topology::Candidate => 1,
      Topology::Likelihood => 2,
      Topology::Hough => 3,
      Topology::Contrast => 4,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Topology::Azimu => "azimu",
      Topology::Candidate => "candidate",
      Topology::Likelihood => "likelihood",
      Topology::Hough => "hough",
      Topology::Contrast => "contrast",
    }
  }

  /// Wire this topology from `catalogue` and validate the result.
  #[instrument(skip(catalogue), fields(topology = self.name()))]
  pub fn build(self, catalogue: &TaskCatalogue) -> Result<Pipeline, PipelineError> {
    let mut graph = PipelineBuilder::new(catalogue);
    let ring = || catalogue.branch(&["ring_pattern", "ring_stack", "ring_fft", "ring_loop"]);

    match self {
      Topology::Azimu => {
        let b1 = catalogue.branch(&[
          "read",
          "crop",
          "bc_image",
          "rescale",
          "contrast",
          "input_fft",
        ])?;
        let b2 = ring()?;
        let b3 = catalogue.branch(&["bc_image"])?;
        let b4 = catalogue.branch(&["ring_convolution", "ifft", "likelihood", "cand"])?;
        let b5 = catalogue.branch(&["azimu", "ring_writer"])?;
        graph.merge_branch(&[&b1, &b2, &b4])?;
        graph.merge_branch(&[&b3, &b4, &b5])?;
      }
      Topology::Candidate => {
        let b1 = catalogue.branch(&["read", "crop", "rescale", "contrast", "input_fft"])?;
        let b2 = ring()?;
        let b3 = catalogue.branch(&[
          "ring_convolution",
          "ifft",
          "likelihood",
          "cand",
          "ring_writer",
        ])?;
        graph.merge_branch(&[&b1, &b2, &b3])?;
      }
      Topology::Likelihood => {
        let b1 = catalogue.branch(&["read", "crop", "rescale", "contrast", "input_fft"])?;
        let b2 = ring()?;
        let b3 = catalogue.branch(&["ring_convolution", "ifft", "likelihood", "write"])?;
        graph.merge_branch(&[&b1, &b2, &b3])?;
      }
      Topology::Hough => {
        // Contrast is applied before rescaling here.
        let b1 = catalogue.branch(&["read", "crop", "contrast", "rescale", "input_fft"])?;
        let b2 = ring()?;
        let b3 = catalogue.branch(&["ring_convolution", "ifft", "write"])?;
        graph.merge_branch(&[&b1, &b2, &b3])?;
      }
      Topology::Contrast => {
        let b1 = catalogue.branch(&["read", "crop", "rescale", "contrast", "write"])?;
        graph.add_branch(&b1)?;
      }
    }

    debug!("topology wired");
    graph.finish()
  }
}

impl fmt::Display for Topology {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl TryFrom<&GraphSelector> for Topology {
  type Error = PipelineError;

  fn try_from(selector: &GraphSelector) -> Result<Self, Self::Error> {
    let found = match selector {
      GraphSelector::Index(index) => Topology::ALL.into_iter().find(|t| t.index() == *index),
      GraphSelector::Name(name) => Topology::ALL.into_iter().find(|t| t.name() == name),
    };
    found.ok_or_else(|| PipelineError::UnknownTopologySelector {
      selector: selector.to_string(),
    })
  }
}
