pub mod simulation;
pub mod configuration;
pub mod output;
pub mod runner;
pub mod error;

pub use simulation::states::{Body, System, NVec, NVec2, NVec3};
pub use simulation::forces::{Acceleration, AccelSet, Pairing};
pub use simulation::integrator::{verlet_integrator, rk4_integrator};
pub use simulation::scenario::Scenario;
pub use simulation::dataset::SimulationDataset;
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;

pub use configuration::config::{IntegratorConfig, RunConfig};
pub use configuration::presets::{SimKind, SimPreset, SIM_SETS};

pub use output::{write_dataset, DatasetPaths};
pub use runner::{Runner, standard_sets, run_standard_sets};
pub use error::SimError;
