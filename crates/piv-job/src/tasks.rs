use piv_config::PivParams;
use piv_graph::{ParamValue, Params, PipelineError, TaskCatalogue, TaskKind};

/// Build a parameter mapping from `(name, value)` pairs.
fn params<const N: usize>(entries: [(&str, ParamValue); N]) -> Params {
  entries
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

/// Register the reader and the two writers every topology draws from.
fn setup_basic_tasks(catalogue: &mut TaskCatalogue, p: &PivParams) -> Result<(), PipelineError> {
  catalogue.add_task(
    "read",
    TaskKind::Read,
    params([("path", p.input_path.as_str().into())]),
  )?;
  catalogue.add_task(
    "write",
    TaskKind::Write,
    params([("filename", p.output_path.as_str().into())]),
  )?;
  catalogue.add_task(
    "ring_writer",
    TaskKind::RingWriter,
    params([("filename", p.ring_output_path.as_str().into())]),
  )?;
  Ok(())
}

/// Build the task catalogue of a ring-detection job.
///
/// The ring template and likelihood stages work on the rescaled frame, so
/// their geometry is divided by `scale`. The candidate filter and the
/// azimuthal test map results back to frame coordinates and therefore get
/// the raw ring geometry plus `scale`.
pub fn setup_tasks(p: &PivParams) -> Result<TaskCatalogue, PipelineError> {
  let mut catalogue = TaskCatalogue::new();
  setup_basic_tasks(&mut catalogue, p)?;

  let sc = p.scale;

  catalogue.add_task(
    "crop",
    TaskKind::Crop,
    params([
      ("x", p.xshift.into()),
      ("y", p.yshift.into()),
      ("width", p.width.into()),
      ("height", p.height.into()),
    ]),
  )?;

  let contrast = match p.contrast {
    Some(c) => params([
      ("c1", c.c1.into()),
      ("c2", c.c2.into()),
      ("c3", c.c3.into()),
      ("c4", c.c4.into()),
    ]),
    None => Params::new(),
  };
  catalogue.add_task("contrast", TaskKind::Contrast, contrast)?;

  catalogue.add_task(
    "rescale",
    TaskKind::Rescale,
    params([("factor", (1.0 / sc).into())]),
  )?;
  catalogue.add_task(
    "input_fft",
    TaskKind::Fft,
    params([("dimensions", 2i64.into())]),
  )?;
  catalogue.add_copy_task("bc_image")?;

  catalogue.add_task(
    "ring_fft",
    TaskKind::Fft,
    params([("dimensions", 2i64.into())]),
  )?;
  catalogue.add_task(
    "ring_stack",
    TaskKind::Stack,
    params([("number", p.ring_number.into())]),
  )?;
  catalogue.add_task(
    "ring_loop",
    TaskKind::Loop,
    params([("count", p.number.into())]),
  )?;
  catalogue.add_task("ring_convolution", TaskKind::ComplexMult, Params::new())?;
  catalogue.add_task("ring_slice", TaskKind::Slice, Params::new())?;
  catalogue.add_task(
    "ring_pattern",
    TaskKind::RingPattern,
    params([
      ("start", (p.ring_start / sc).into()),
      ("end", (p.ring_end / sc).into()),
      ("step", (p.ring_step / sc).into()),
      ("thickness", (p.ring_thickness / sc).into()),
      ("method", p.ring_method.into()),
      ("width", (p.width / sc).into()),
      ("height", (p.height / sc).into()),
    ]),
  )?;

  catalogue.add_task(
    "ifft",
    TaskKind::Ifft,
    params([("dimensions", 2i64.into())]),
  )?;
  catalogue.add_task(
    "likelihood",
    TaskKind::HoughLikelihood,
    params([
      ("masksize", p.likelihoodmask.into()),
      ("maskinnersize", p.likelihoodmaskinner.into()),
    ]),
  )?;
  catalogue.add_task(
    "cand",
    TaskKind::CandidateFilter,
    params([
      ("threshold", p.candi_threshold.into()),
      ("ring_start", p.ring_start.into()),
      ("ring_step", p.ring_step.into()),
      ("ring_end", p.ring_end.into()),
      ("scale", sc.into()),
    ]),
  )?;
  catalogue.add_task(
    "azimu",
    TaskKind::AzimuthalTest,
    params([("scale", sc.into())]),
  )?;

  Ok(catalogue)
}
