//! Simulation runner
//!
//! Turns a [`RunConfig`] into files on disk: validate, resolve the preset
//! time step, generate the dataset, persist both arrays. All validation
//! happens in [`Runner::new`], before any integration work.

use std::path::PathBuf;

use log::{info, warn};

use crate::configuration::config::RunConfig;
use crate::configuration::presets::SimKind;
use crate::error::SimError;
use crate::output::{write_dataset, DatasetPaths};
use crate::simulation::dataset::SimulationDataset;
use crate::simulation::engine::Engine;

/// A validated, ready-to-run configuration
#[derive(Debug, Clone)]
pub struct Runner {
    pub sim: SimKind,
    pub episodes: usize,
    pub seed: u64,
    pub out_dir: PathBuf,
    dataset: SimulationDataset,
}

impl Runner {
    pub fn new(cfg: &RunConfig) -> Result<Self, SimError> {
        let sim: SimKind = cfg.sim.parse()?;
        let preset = sim.preset();

        if cfg.episodes == 0 {
            return Err(SimError::NoEpisodes);
        }
        if cfg.substeps == 0 {
            return Err(SimError::NoSubsteps);
        }
        let steps = cfg.steps.unwrap_or_else(|| preset.default_steps());

        let engine = Engine {
            integrator: cfg.integrator,
            threads: cfg.threads,
        };
        let dataset = SimulationDataset::new(sim, cfg.n, cfg.dim, steps, preset.dt)?
            .with_engine(engine)
            .with_substeps(cfg.substeps)
            .with_params_columns(cfg.include_params);

        Ok(Self {
            sim,
            episodes: cfg.episodes,
            seed: cfg.seed,
            out_dir: cfg.out_dir.clone(),
            dataset,
        })
    }

    pub fn title(&self) -> String {
        self.dataset.title()
    }

    pub fn dt(&self) -> f64 {
        self.dataset.parameters.dt
    }

    /// Generate the dataset and write it to the output directory
    pub fn run(self) -> Result<DatasetPaths, SimError> {
        info!(
            "run {}: dt = {} from preset, seed = {}, output in {}",
            self.title(),
            self.dt(),
            self.seed,
            self.out_dir.display()
        );

        let title = self.title();
        let mut dataset = self.dataset;
        dataset.simulate(self.episodes, self.seed)?;
        let (data, acc) = dataset.into_arrays()?;

        write_dataset(&self.out_dir, &title, &data, &acc)
    }
}

/// Every (sim, n, dim) combination of the standard simulation sets, with
/// the remaining settings taken from `base`
pub fn standard_sets(base: &RunConfig) -> Vec<RunConfig> {
    SimKind::ALL
        .iter()
        .flat_map(|sim| {
            let preset = sim.preset();
            preset.n.iter().flat_map(move |&n| {
                preset.dims.iter().map(move |&dim| RunConfig {
                    sim: sim.name().to_string(),
                    n,
                    dim,
                    ..base.clone()
                })
            })
        })
        .collect()
}

/// Run the whole standard sweep. Each item is validated up front; a failing
/// item is logged and the sweep carries on, then the titles of every failed
/// item come back as [`SimError::SweepFailed`].
pub fn run_standard_sets(base: &RunConfig) -> Result<Vec<DatasetPaths>, SimError> {
    let runners = standard_sets(base)
        .iter()
        .map(Runner::new)
        .collect::<Result<Vec<_>, _>>()?;

    let total = runners.len();
    let mut written = Vec::with_capacity(total);
    let mut failed = Vec::new();
    for (i, runner) in runners.into_iter().enumerate() {
        let title = runner.title();
        info!("sweep {}/{}: {}", i + 1, total, title);
        match runner.run() {
            Ok(paths) => written.push(paths),
            Err(e) => {
                warn!("sweep item {} failed: {}", title, e);
                failed.push(title);
            }
        }
    }

    if !failed.is_empty() {
        return Err(SimError::SweepFailed { failed });
    }
    Ok(written)
}
