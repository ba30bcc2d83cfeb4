use nbsim::{run_standard_sets, IntegratorConfig, RunConfig, Runner};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

/// Generate seeded N-body trajectory datasets
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Physical system: r1, r2, spring, string, charge, superposition, damped, discontinuous
    #[arg(long, default_value = "r2")]
    sim: String,

    /// Particle count
    #[arg(short, default_value_t = 4)]
    n: usize,

    /// Spatial dimension (2 or 3)
    #[arg(long, default_value_t = 2)]
    dim: usize,

    /// Number of independent episodes
    #[arg(long, default_value_t = 10_000)]
    episodes: usize,

    /// Recorded steps per episode [default: half the preset step count]
    #[arg(long)]
    steps: Option<usize>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output directory, created if missing
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = IntegratorConfig::Rk4)]
    integrator: IntegratorConfig,

    /// Integrator steps per recorded step
    #[arg(long, default_value_t = 4)]
    substeps: usize,

    /// Worker threads (1 runs on the main thread) [default: one per core]
    #[arg(long)]
    threads: Option<usize>,

    /// Append charge and mass columns to the trajectory array
    #[arg(long)]
    include_params: bool,

    /// Generate every standard simulation set instead of a single run
    #[arg(long)]
    sweep: bool,

    /// YAML run file; replaces all other run flags
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        if let Some(path) = &self.config {
            return RunConfig::from_yaml_file(path);
        }
        Ok(RunConfig {
            sim: self.sim.clone(),
            n: self.n,
            dim: self.dim,
            episodes: self.episodes,
            steps: self.steps,
            seed: self.seed,
            out_dir: self.out_dir.clone(),
            integrator: self.integrator,
            substeps: self.substeps,
            threads: self.threads,
            include_params: self.include_params,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = args.run_config()?;

    if args.sweep {
        let written = run_standard_sets(&cfg).context("standard set sweep failed")?;
        info!("sweep wrote {} datasets", written.len());
        return Ok(());
    }

    let runner = Runner::new(&cfg).context("invalid run configuration")?;
    let paths = runner.run().context("simulation run failed")?;
    info!("done: {}", paths.data.display());

    Ok(())
}
