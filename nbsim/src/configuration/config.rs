//! Configuration types for a dataset generation run.
//!
//! A run is described by a single [`RunConfig`], built either from the
//! command line or from a YAML file. Every field has a default (`sim`
//! defaults to `r2`), so even an empty YAML mapping is a valid run file.
//!
//! # YAML format
//!
//! ```yaml
//! sim: "spring"        # r1, r2, spring, string, charge, superposition, damped, discontinuous
//! n: 4                 # particle count
//! dim: 2               # 2 or 3
//! episodes: 10000      # independent trajectories
//! steps: 500           # recorded steps per episode (default: half the preset nt)
//! seed: 42             # deterministic seed
//! out_dir: "data"      # created if missing
//! integrator: "rk4"    # or "verlet"
//! substeps: 4          # integrator steps per recorded step
//! threads: 8           # omit for one worker per core, 1 for sequential
//! include_params: false  # append charge and mass columns to the trajectory
//! ```
//!
//! The time step is not configurable: it always comes from the preset table.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which integrator advances the system between recorded steps
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // Velocity Verlet. Symplectic, exact only for position-dependent forces
    Verlet,

    #[default]
    #[serde(rename = "rk4")] // Classical 4th-order Runge-Kutta, handles velocity-dependent forces
    Rk4,
}

/// Top-level run configuration
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub sim: String, // system name, validated against the preset table
    pub n: usize, // particle count
    pub dim: usize, // spatial dimension
    pub episodes: usize, // number of independent trajectories
    pub steps: Option<usize>, // recorded steps per episode
    pub seed: u64, // deterministic seed
    pub out_dir: PathBuf, // output directory
    pub integrator: IntegratorConfig,
    pub substeps: usize, // integrator steps per recorded step
    pub threads: Option<usize>, // worker count
    pub include_params: bool, // append charge and mass to the trajectory
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim: "r2".to_string(),
            n: 4,
            dim: 2,
            episodes: 10_000,
            steps: None,
            seed: 42,
            out_dir: PathBuf::from("data"),
            integrator: IntegratorConfig::Rk4,
            substeps: 4,
            threads: None,
            include_params: false,
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open run file {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg: RunConfig = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse run file {}", path.display()))?;
        Ok(cfg)
    }
}
