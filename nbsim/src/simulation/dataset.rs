//! Trajectory dataset generation
//!
//! `SimulationDataset` runs many independent episodes of one physical system
//! and collects two arrays:
//! - trajectories, `(episodes, steps, n, 2 * dim)`: positions then velocities
//!   (plus charge and mass when `include_params` is set),
//! - accelerations, `(episodes, steps, n, dim)`, evaluated from the force law
//!   at every recorded state.
//!
//! Episode `e` draws its initial conditions from ChaCha8 stream `e` of the
//! run seed, so the output does not depend on how episodes are scheduled.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use ndarray::Array4;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::configuration::presets::SimKind;
use crate::error::SimError;
use crate::simulation::engine::Engine;
use crate::simulation::integrator::step;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec;

/// Fewest particles an interacting system can have
pub const MIN_PARTICLES: usize = 2;

/// Flattened output of one episode
struct Episode {
    traj: Vec<f32>,
    acc: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct SimulationDataset {
    pub sim: SimKind,
    pub n: usize, // particle count
    pub dim: usize, // spatial dimension
    pub nt: usize, // recorded steps per episode
    pub parameters: Parameters,
    pub engine: Engine,
    pub include_params: bool, // append charge and mass columns
    data: Option<Array4<f32>>,
    acc: Option<Array4<f32>>,
}

impl SimulationDataset {
    pub fn new(sim: SimKind, n: usize, dim: usize, nt: usize, dt: f64) -> Result<Self, SimError> {
        if dim != 2 && dim != 3 {
            return Err(SimError::InvalidDimension { dim });
        }
        if n < MIN_PARTICLES {
            return Err(SimError::TooFewParticles { n, min: MIN_PARTICLES });
        }
        if nt == 0 {
            return Err(SimError::NoSteps);
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimeStep { dt });
        }

        Ok(Self {
            sim,
            n,
            dim,
            nt,
            parameters: Parameters::with_dt(dt),
            engine: Engine::default(),
            include_params: false,
            data: None,
            acc: None,
        })
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the physical constants. The time step set at construction is kept.
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Parameters {
            dt: self.parameters.dt,
            ..parameters
        };
        self
    }

    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.parameters.substeps = substeps;
        self
    }

    pub fn with_params_columns(mut self, include: bool) -> Self {
        self.include_params = include;
        self
    }

    /// `<sim>_n=<n>_dim=<dim>`
    pub fn title(&self) -> String {
        format!("{}_n={}_dim={}", self.sim, self.n, self.dim)
    }

    /// Width of the trajectory's last axis
    pub fn columns(&self) -> usize {
        if self.include_params {
            2 * self.dim + 2
        } else {
            2 * self.dim
        }
    }

    /// Generate `episodes` trajectories from `seed`, replacing any earlier data
    pub fn simulate(&mut self, episodes: usize, seed: u64) -> Result<(), SimError> {
        if episodes == 0 {
            return Err(SimError::NoEpisodes);
        }
        if self.parameters.substeps == 0 {
            return Err(SimError::NoSubsteps);
        }

        info!(
            "simulating {} episodes of {} ({} steps, dt = {}, {} substeps, {:?}, {})",
            episodes,
            self.title(),
            self.nt,
            self.parameters.dt,
            self.parameters.substeps,
            self.engine.integrator,
            self.engine.describe(),
        );
        let timer = Instant::now();

        let episodes_out = match self.dim {
            2 => self.run_episodes::<2>(episodes, seed)?,
            3 => self.run_episodes::<3>(episodes, seed)?,
            dim => return Err(SimError::InvalidDimension { dim }),
        };

        let mut traj = Vec::with_capacity(episodes * self.nt * self.n * self.columns());
        let mut acc = Vec::with_capacity(episodes * self.nt * self.n * self.dim);
        for ep in episodes_out {
            traj.extend_from_slice(&ep.traj);
            acc.extend_from_slice(&ep.acc);
        }

        self.data = Some(Array4::from_shape_vec((episodes, self.nt, self.n, self.columns()), traj)?);
        self.acc = Some(Array4::from_shape_vec((episodes, self.nt, self.n, self.dim), acc)?);

        info!("simulation took {:.2} s", timer.elapsed().as_secs_f64());
        Ok(())
    }

    /// Trajectory array, `(episodes, steps, n, columns)`
    pub fn data(&self) -> Result<&Array4<f32>, SimError> {
        self.data.as_ref().ok_or(SimError::NotSimulated)
    }

    /// Acceleration array, `(episodes, steps, n, dim)`
    pub fn acceleration(&self) -> Result<&Array4<f32>, SimError> {
        self.acc.as_ref().ok_or(SimError::NotSimulated)
    }

    /// Take both arrays out of the dataset
    pub fn into_arrays(self) -> Result<(Array4<f32>, Array4<f32>), SimError> {
        match (self.data, self.acc) {
            (Some(data), Some(acc)) => Ok((data, acc)),
            _ => Err(SimError::NotSimulated),
        }
    }

    fn run_episodes<const D: usize>(&self, episodes: usize, seed: u64) -> Result<Vec<Episode>, SimError> {
        let done = AtomicUsize::new(0);
        let report_every = (episodes / 10).max(1);

        let run_one = |episode: usize| -> Result<Episode, SimError> {
            let out = self.run_episode::<D>(episode, seed)?;
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if finished % report_every == 0 {
                debug!("{}/{} episodes done", finished, episodes);
            }
            Ok(out)
        };

        // Results are collected in episode order either way
        self.engine.install(|parallel| {
            if parallel {
                (0..episodes).into_par_iter().map(run_one).collect()
            } else {
                (0..episodes).map(run_one).collect()
            }
        })?
    }

    fn run_episode<const D: usize>(&self, episode: usize, seed: u64) -> Result<Episode, SimError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(episode as u64);

        let Scenario { mut system, forces, parameters, .. } =
            Scenario::<D>::build_scenario(self.sim, self.n, self.parameters.clone(), &mut rng);
        let h = parameters.h();

        let mut traj = Vec::with_capacity(self.nt * self.n * self.columns());
        let mut acc = Vec::with_capacity(self.nt * self.n * D);
        let mut a = vec![NVec::<D>::zeros(); self.n];

        for frame in 0..self.nt {
            if frame > 0 {
                for _ in 0..parameters.substeps {
                    step(self.engine.integrator, &mut system, &forces, h);
                }
            }

            forces.accumulate_accels(system.t, &system, &mut a);
            if !system.is_finite() || a.iter().any(|ai| ai.iter().any(|c| !c.is_finite())) {
                return Err(SimError::NanOrInf { episode, step: frame });
            }

            for (b, ai) in system.bodies.iter().zip(a.iter()) {
                traj.extend(b.x.iter().chain(b.v.iter()).map(|&c| c as f32));
                if self.include_params {
                    traj.push(b.q as f32);
                    traj.push(b.m as f32);
                }
                acc.extend(ai.iter().map(|&c| c as f32));
            }
        }

        Ok(Episode { traj, acc })
    }
}
