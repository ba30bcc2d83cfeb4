//! Build fully-initialized episodes
//!
//! A `Scenario` is the runtime bundle for one episode:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//!
//! Initial conditions are drawn from a caller-supplied RNG, so an episode is
//! fully determined by its stream.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::configuration::presets::SimKind;
use crate::simulation::forces::AccelSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};

pub struct Scenario<const D: usize> {
    pub sim: SimKind,
    pub parameters: Parameters,
    pub system: System<D>,
    pub forces: AccelSet<D>,
}

impl<const D: usize> Scenario<D> {
    pub fn build_scenario<R: Rng>(
        sim: SimKind,
        n: usize,
        parameters: Parameters,
        rng: &mut R,
    ) -> Self {
        let bodies = (0..n)
            .map(|i| Body::from_packed(&initial_row::<D, R>(sim, i, rng)))
            .collect();

        let forces = AccelSet::for_sim(sim, &parameters);

        Self {
            sim,
            parameters,
            system: System::new(bodies),
            forces,
        }
    }
}

/// Packed `[x.., v.., q, m]` row for body `i`, drawn from a standard normal
/// and then shaped for the system
fn initial_row<const D: usize, R: Rng>(sim: SimKind, i: usize, rng: &mut R) -> Vec<f64> {
    let mut row: Vec<f64> = (0..Body::<D>::PACKED_LEN)
        .map(|_| rng.sample(StandardNormal))
        .collect();
    let (q, m) = (2 * D, 2 * D + 1);

    match sim {
        SimKind::String => {
            // unit masses strung out along axis 0, column 2 at rest
            row[m] = 1.0;
            row[0] = i as f64 + 0.5 * row[0];
            row[2] = 0.0;
        }
        _ => {
            // strictly positive masses
            row[m] = row[m].exp();
            if matches!(sim, SimKind::Charge | SimKind::Superposition) {
                row[q] = row[q].signum();
            }
        }
    }
    row
}
