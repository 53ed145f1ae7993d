use tracing::{error, info, instrument};

use piv_config::{ExecutionFlags, GraphSelector, PivConfig, PivParams};
use piv_graph::{Pipeline, PipelineError, TaskCatalogue};

use crate::engine::{Engine, ExecutionReport};
use crate::error::JobError;
use crate::tasks::setup_tasks;
use crate::topology::Topology;

/// A ring-detection job: the task catalogue built from a Parameter Set,
/// execution flags and the engine the assembled pipeline is handed to.
pub struct Job<E: Engine> {
  catalogue: TaskCatalogue,
  flags: ExecutionFlags,
  engine: E,
}

impl<E: Engine> Job<E> {
  /// Validate the parameters and build the task catalogue.
  pub fn new(params: PivParams, flags: ExecutionFlags, engine: E) -> Result<Self, JobError> {
    params.validate()?;
    let catalogue = setup_tasks(&params)?;
    info!(tasks = catalogue.len(), "job created");

    Ok(Self {
      catalogue,
      flags,
      engine,
    })
  }

  /// Create a job from a loaded config document.
  pub fn from_config(config: PivConfig, engine: E) -> Result<Self, JobError> {
    Self::new(config.parms, config.config.flags(), engine)
  }

  pub fn catalogue(&self) -> &TaskCatalogue {
    &self.catalogue
  }

  pub fn flags(&self) -> &ExecutionFlags {
    &self.flags
  }

  /// Resolve a raw selector, logging rejected values. A missing selector is
  /// rejected like an unknown one.
  pub fn topology(&self, selector: Option<&GraphSelector>) -> Result<Topology, PipelineError> {
    let result = match selector {
      Some(selector) => Topology::try_from(selector),
      None => Err(PipelineError::UnknownTopologySelector {
        selector: "none".to_string(),
      }),
    };
    result.inspect_err(|e| {
      error!(error = %e, "no graph built");
    })
  }

  /// Assemble the pipeline of `topology`. Pure: repeated calls yield equal
  /// pipelines.
  pub fn build_pipeline(&self, topology: Topology) -> Result<Pipeline, PipelineError> {
    topology.build(&self.catalogue)
  }

  /// Build the selected pipeline and hand it to the engine.
  ///
  /// The engine is not called when the selector is unknown or the pipeline
  /// fails to assemble.
  #[instrument(skip_all, fields(selector = ?selector))]
  pub async fn run(&self, selector: Option<&GraphSelector>) -> Result<ExecutionReport, JobError> {
    let topology = self.topology(selector)?;
    let pipeline = self.build_pipeline(topology)?;

    info!(
      topology = %topology,
      nodes = pipeline.nodes.len(),
      edges = pipeline.edges.len(),
      "handing pipeline to engine"
    );

    let report = self.engine.run(&pipeline, &self.flags).await?;
    info!(stages = report.stages.len(), "engine finished");
    Ok(report)
  }
}
