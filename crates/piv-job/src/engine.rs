use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use piv_config::ExecutionFlags;
use piv_graph::{Pipeline, TaskKind};

use crate::error::EngineError;

/// Executes an assembled pipeline.
///
/// Implementations own scheduling, device assignment and profiling; the job
/// only guarantees the pipeline is acyclic and every convergence task has
/// its declared number of inputs.
#[async_trait]
pub trait Engine: Send + Sync {
  async fn run(
    &self,
    pipeline: &Pipeline,
    flags: &ExecutionFlags,
  ) -> Result<ExecutionReport, EngineError>;
}

/// One scheduled task of an execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedStage {
  pub task: String,
  /// `None` for copy tasks.
  pub kind: Option<TaskKind>,
  pub inputs: Vec<String>,
  pub device: &'static str,
}

/// What an engine did with a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
  pub flags: ExecutionFlags,
  pub stages: Vec<PlannedStage>,
}

/// Dry-run engine: schedules the pipeline in dependency order and reports
/// the plan without touching any image data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanEngine;

impl PlanEngine {
  pub fn new() -> Self {
    Self
  }

  fn device(flags: &ExecutionFlags, kind: Option<TaskKind>) -> &'static str {
    match kind {
      Some(TaskKind::Read | TaskKind::Write | TaskKind::RingWriter) => "host",
      _ if flags.device_cpu => "cpu",
      _ => "any",
    }
  }
}

#[async_trait]
impl Engine for PlanEngine {
  async fn run(
    &self,
    pipeline: &Pipeline,
    flags: &ExecutionFlags,
  ) -> Result<ExecutionReport, EngineError> {
    let graph = pipeline.graph();
    let order = graph
      .topological_order()
      .ok_or_else(|| EngineError::Rejected("pipeline contains a cycle".to_string()))?;

    info!(
      stages = order.len(),
      profiling = flags.profiling,
      device_cpu = flags.device_cpu,
      sched_fixed = flags.sched_fixed,
      "planning pipeline"
    );

    let mut stages = Vec::with_capacity(order.len());
    for name in order {
      let task = pipeline
        .get_task(&name)
        .ok_or_else(|| EngineError::Rejected(format!("edge references unknown task: {}", name)))?;
      let stage = PlannedStage {
        kind: task.kind(),
        inputs: graph.upstream(&name).to_vec(),
        device: Self::device(flags, task.kind()),
        task: name,
      };
      debug!(task = %stage.task, inputs = ?stage.inputs, device = stage.device, "stage scheduled");
      stages.push(stage);
    }

    Ok(ExecutionReport {
      flags: *flags,
      stages,
    })
  }
}
