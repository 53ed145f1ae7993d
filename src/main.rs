use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use piv_config::{GraphSelector, PivConfig};
use piv_job::{Job, PlanEngine};

/// piv-hough - ring detection pipelines for PIV frames
#[derive(Parser)]
#[command(name = "piv-hough")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the selected pipeline and hand it to the engine
  Run {
    /// Path to the job config file (JSON)
    config_file: PathBuf,

    /// Topology to build, by index (0-4) or name; overrides `config.graph`
    #[arg(long)]
    graph: Option<GraphSelector>,
  },

  /// Print the assembled pipeline without running it
  Graph {
    /// Path to the job config file (JSON)
    config_file: PathBuf,

    /// Topology to build, by index (0-4) or name; overrides `config.graph`
    #[arg(long)]
    graph: Option<GraphSelector>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run { config_file, graph }) => run_job(config_file, graph)?,
    Some(Commands::Graph { config_file, graph }) => print_graph(config_file, graph)?,
    None => {
      println!("piv-hough - use --help to see available commands");
    }
  }

  Ok(())
}

fn load_config(config_file: &Path) -> Result<PivConfig> {
  PivConfig::load(config_file)
    .with_context(|| format!("failed to load config file: {}", config_file.display()))
}

fn run_job(config_file: PathBuf, graph: Option<GraphSelector>) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_job_async(config_file, graph).await })
}

async fn run_job_async(config_file: PathBuf, graph: Option<GraphSelector>) -> Result<()> {
  let config = load_config(&config_file)?;
  let selector = graph.or_else(|| config.config.graph.clone());

  let job = Job::from_config(config, PlanEngine::new()).context("failed to create job")?;
  let report = job.run(selector.as_ref()).await.context("job failed")?;

  println!("{}", serde_json::to_string_pretty(&report)?);
  Ok(())
}

fn print_graph(config_file: PathBuf, graph: Option<GraphSelector>) -> Result<()> {
  let config = load_config(&config_file)?;
  let selector = graph.or_else(|| config.config.graph.clone());

  let job = Job::from_config(config, PlanEngine::new()).context("failed to create job")?;
  let topology = job.topology(selector.as_ref())?;
  let pipeline = job
    .build_pipeline(topology)
    .with_context(|| format!("failed to build {} pipeline", topology))?;

  println!("{}", serde_json::to_string_pretty(&pipeline)?);
  Ok(())
}
